//! User-facing (Spanish) toast texts and error-message classification

/// Shown for a 401 and for any permission failure reported by the backend
pub const PERMISSION_DENIED: &str = "No tienes permisos para realizar esta acción";

/// Shown when a list endpoint returns something other than an array
pub const INVALID_RESPONSE: &str = "Respuesta inválida del servidor";

/// Shown when the backend cannot be reached
pub const CONNECTION_FAILED: &str = "No se pudo conectar con el servidor";

/// Warning raised by the zero-stock guard
pub const ZERO_STOCK_SELECTED: &str =
    "Algunos productos seleccionados no tienen stock en el almacén de origen y fueron excluidos";

pub const TRANSFER_CREATED: &str = "Transferencia creada exitosamente";

/// Warning when both halves exist but the exit could not be pointed at its entry
pub const TRANSFER_LINK_FAILED: &str =
    "La transferencia se creó, pero no se pudo vincular la salida con la entrada";

/// Milliseconds a form waits before resetting after an authorization error
pub const UNAUTHORIZED_RESET_DELAY_MS: u64 = 1000;

const PERMISSION_MARKERS: [&str; 2] = ["No autorizado", "Unauthorized"];

/// Whether a backend message reports missing permissions
pub fn is_permission_message(message: &str) -> bool {
    PERMISSION_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

/// Text to show for a backend error message
pub fn display_message(message: &str) -> String {
    if is_permission_message(message) {
        PERMISSION_DENIED.to_string()
    } else {
        message.to_string()
    }
}

pub fn created(label: &str) -> String {
    format!("{} creado exitosamente", label)
}

pub fn updated(label: &str) -> String {
    format!("{} actualizado exitosamente", label)
}

pub fn deactivated(label: &str) -> String {
    format!("{} desactivado exitosamente", label)
}

pub fn reactivated(label: &str) -> String {
    format!("{} reactivado exitosamente", label)
}

/// Toast for the paired half of a transference
pub fn linked_deactivated(label: &str) -> String {
    format!("{} vinculada desactivada exitosamente", label)
}

pub fn linked_reactivated(label: &str) -> String {
    format!("{} vinculada reactivada exitosamente", label)
}

/// Toast after a compensating rollback of a half-applied transference
pub fn rolled_back(label: &str) -> String {
    format!(
        "No se pudo actualizar la transferencia vinculada; se revirtió el cambio en {}",
        label.to_lowercase()
    )
}
