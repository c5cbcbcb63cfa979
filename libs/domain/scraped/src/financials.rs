// [libs/domain/scraped/src/financials.rs]
/*!
 * APARATO: HISTORIAL FINANCIERO MULTI-AÑO (V1.0)
 * RESPONSABILIDAD: OPERACIÓN SECUNDARIA SOBRE EL MISMO JSON DE COMPANY PAGE (§4.4)
 *
 * Separada de `company.rs` porque no todos los llamadores necesitan el
 * historial completo — sólo el año más reciente viaja dentro de CompanyRecord.
 */

use serde_json::Value;
use std::collections::HashMap;

use sentinel_domain_models::FinancialAccount;

use crate::parsing::{parse_int_value, parse_swedish_date};

const FINANCIAL_STATEMENTS_KEY: &str = "financialStatements";

/// Walks `company_data.financialStatements[*]`, each holding a `year`, an
/// optional reporting period, and an `accounts` array of `{code, amount}`
/// pairs (the same shape person pages use for the `SDI` revenue lookup).
pub fn extract_financial_history(company_data: &Value) -> Vec<FinancialAccount> {
    let Some(statements) = company_data.get(FINANCIAL_STATEMENTS_KEY).and_then(Value::as_array) else {
        return Vec::new();
    };

    statements
        .iter()
        .filter_map(|statement| {
            let year = statement.get("year").and_then(Value::as_i64)? as i32;
            let period_start = statement.get("periodStart").and_then(Value::as_str).and_then(parse_swedish_date);
            let period_end = statement.get("periodEnd").and_then(Value::as_str).and_then(parse_swedish_date);
            let currency = statement.get("currency").and_then(Value::as_str).map(String::from);

            let accounts: HashMap<String, i64> = statement
                .get("accounts")
                .and_then(Value::as_array)
                .map(|entries| {
                    entries
                        .iter()
                        .filter_map(|entry| {
                            let code = entry.get("code").and_then(Value::as_str)?.to_string();
                            let amount = parse_int_value(entry.get("amount"))?;
                            Some((code, amount))
                        })
                        .collect()
                })
                .unwrap_or_default();

            Some(FinancialAccount { year, period_start, period_end, currency, accounts })
        })
        .collect()
}

/// Looks up a specific account code (e.g. `"SDI"` for revenue) in the most
/// recent year's `accounts` array — mirrors the person-page lookup in
/// `parser_person.py`'s `companyAccounts[0]` traversal.
pub fn latest_account_amount(company_accounts: &Value, code: &str) -> Option<i64> {
    let latest = company_accounts.as_array()?.first()?;
    let accounts = latest.get("accounts")?.as_array()?;
    accounts
        .iter()
        .find(|entry| entry.get("code").and_then(Value::as_str) == Some(code))
        .and_then(|entry| parse_int_value(entry.get("amount")))
}
