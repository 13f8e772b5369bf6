//! Timing and log sink shared by the wasm and native builds.
//!
//! In the browser, lines go to the devtools console. Natively they become
//! `tracing` events, so build scripts and tests pick them up with whatever
//! subscriber they install (or drop them if none is installed).

/// Milliseconds from an arbitrary fixed origin
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds from an arbitrary fixed origin
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    ORIGIN.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Emit one log line
#[cfg(target_arch = "wasm32")]
pub fn log(line: &str) {
    web_sys::console::log_1(&line.into());
}

/// Emit one log line
#[cfg(not(target_arch = "wasm32"))]
pub fn log(line: &str) {
    tracing::debug!(target: "wiki_engine::perf", "{}", line);
}
