//! Logger setup
//!
//! Browser console on web, `env_logger` (honours `RUST_LOG`) on native.
//! Safe to call more than once.

use std::sync::Once;

static INIT: Once = Once::new();

pub fn init() {
    INIT.call_once(|| {
        #[cfg(target_arch = "wasm32")]
        {
            console_error_panic_hook::set_once();
            if console_log::init_with_level(log::Level::Info).is_err() {
                return;
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        if env_logger::try_init().is_err() {
            return;
        }

        log::info!("Muslim Task Manager core v{}", env!("CARGO_PKG_VERSION"));
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_init_twice() {
        super::init();
        super::init();
        log::info!("still logging");
    }
}
