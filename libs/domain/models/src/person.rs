// [libs/domain/models/src/person.rs]
/*!
 * APARATO: PERSON PROFILE DOMAIN MODEL (V1.0)
 * RESPONSABILIDAD: PRODUCTO OPCIONAL DEL SEGUNDO PASE DEL SCRAPED ADAPTER (§4.5.3, §10.6)
 */

use serde::{Deserialize, Serialize};

use crate::director::NormalizedRole;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonRole {
    pub company_orgnr: String,
    pub company_name: String,
    pub raw_role: String,
    pub normalized_role: NormalizedRole,
    pub revenue: Option<i64>,
    pub employees: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonConnection {
    pub person_id: String,
    pub name: String,
    pub gender: Option<String>,
    pub num_connections: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonProfile {
    pub person_id: String,
    pub name: String,
    pub birth_date: Option<chrono::NaiveDate>,
    pub gender: Option<String>,
    pub roles: Vec<PersonRole>,
    pub connections: Vec<PersonConnection>,
}
