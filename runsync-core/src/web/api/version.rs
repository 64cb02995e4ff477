use super::*;

/// Gets version information.
pub(super) async fn get() -> Json<Version> {
    Json(Version {
        current: env!("CARGO_PKG_VERSION"),
    })
}
