/// Name the JavaScript facade registers the plugin under.
pub const PLUGIN_NAME: &str = "FirebaseAnalytics";

/// Reserved event logged by `set_current_screen`.
pub const EVENT_SCREEN_VIEW: &str = "screen_view";

/// Parameter carrying the screen name on `screen_view` events.
pub const PARAM_SCREEN_NAME: &str = "screen_name";

/// Default bound on nested parameter lists.
pub const DEFAULT_MAX_PARAMETER_DEPTH: usize = 32;

/// Payload reported when the native SDK resolves an identifier to nothing.
pub const NULL_PAYLOAD: &str = "null";
