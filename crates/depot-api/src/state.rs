use crate::services::FileAccessService;
use depot_core::Config;

/// Main application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub file_access: FileAccessService,
    pub config: Config,
}

#[allow(dead_code)]
fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    assert_send::<AppState>();
    assert_sync::<AppState>();
}
