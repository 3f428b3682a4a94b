use cfg_if::cfg_if;
use log::{debug, error, info};
use funding_rate_viewer::config::Config;

cfg_if! {
    if #[cfg(feature = "console_error_panic_hook")] {
        #[inline]
        fn set_panic_hook() {
            console_error_panic_hook::set_once();
            debug!("panic hook set");
        }
    }
    else {
        fn set_panic_hook() {}
    }
}

cfg_if! {
    if #[cfg(feature = "console_log")] {
        #[inline]
        fn init_log(level: log::Level) {
            // only fails if a logger is already installed
            if console_log::init_with_level(level).is_ok() {
                debug!("log initialized");
            }
        }
    }
    else {
        fn init_log(_level: log::Level) {}
    }
}

fn main() {
    let config = Config::default();

    init_log(config.log_level);
    set_panic_hook();

    // The returned handle can be dropped, the app's event listeners keep it alive.
    match funding_rate_viewer::run(&config) {
        Ok(_) => info!("funding rate viewer initialized (base path {})", config.base_path),
        Err(e) => {
            error!("{}", e);
            wasm_bindgen::throw_str(&e.to_string());
        }
    }
}
