// [libs/shared/telemetry/src/lib.rs]
/*!
 * =================================================================
 * APARATO: TELEMETRY KERNEL (V1.0)
 * CLASIFICACIÓN: SHARED UTILITY (ESTRATO L4/L6)
 * RESPONSABILIDAD: GESTIÓN DE TRAZADO, FILTRADO Y CAPTURA DE PÁNICOS (§10.1)
 * =================================================================
 */

use std::panic;

use tracing::{error, info, instrument};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as formatting_layer, EnvFilter};

/// Initializes the global `tracing` subscriber and panic hook for `service_name`.
///
/// Compact, human-readable output in debug builds; flattened JSON events in
/// release builds. `RUST_LOG` overrides the default filter
/// (`<service_name>=info,reqwest=warn,libsql=error`); `verbose` raises the
/// default floor to `debug` for this invocation only without touching
/// `RUST_LOG` itself (§6.4 `-v` flag).
///
/// # Panics
/// Panics if a global subscriber has already been installed in this process.
#[instrument(skip_all)]
pub fn init_tracing(service_name: &str, verbose: bool) {
    let default_level = if verbose || cfg!(debug_assertions) { "debug" } else { "info" };
    let environmental_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("{service_name}={default_level},reqwest=warn,libsql=error").into()
    });

    let is_release_strata = !cfg!(debug_assertions);

    if is_release_strata {
        tracing_subscriber::registry()
            .with(environmental_filter)
            .with(formatting_layer::layer().json().flatten_event(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(environmental_filter)
            .with(formatting_layer::layer().compact().with_target(false))
            .init();
    }

    install_panic_hook(service_name);

    info!("👁️  [TELEMETRY_ONLINE]: tracing strata initialized for [{}]", service_name);
}

fn install_panic_hook(service_name: &str) {
    let service_id_snapshot = service_name.to_string();

    panic::set_hook(Box::new(move |panic_metadata| {
        let panic_location = panic_metadata
            .location()
            .map(|location| format!("{}:{}:{}", location.file(), location.line(), location.column()))
            .unwrap_or_else(|| "UNKNOWN_LOCATION".to_string());

        let panic_payload_message = panic_metadata
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic_metadata.payload().downcast_ref::<String>().map(|s| s.as_str()))
            .unwrap_or("UNDEFINED_PANIC_PAYLOAD");

        error!(
            target: "panic_monitor",
            service = %service_id_snapshot,
            location = %panic_location,
            "🔥 [PANIC]: stage-worker task terminated abruptly: {}",
            panic_payload_message
        );
    }));
}
