//! 阻塞式提示框

use leptos::logging::warn;

/// 调用 `window.alert` 显示消息
pub fn alert(message: &str) {
    let shown = web_sys::window()
        .map(|w| w.alert_with_message(message).is_ok())
        .unwrap_or(false);
    if !shown {
        warn!("[Dialog] alert unavailable: {}", message);
    }
}
