//! Blocking alerts and console logging

/// Show a blocking alert
pub fn alert(message: &str) {
    log_warn(message);
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub fn log_info(message: &str) {
    web_sys::console::info_1(&message.into());
}

pub fn log_warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

pub fn log_debug(message: &str) {
    web_sys::console::debug_1(&message.into());
}
