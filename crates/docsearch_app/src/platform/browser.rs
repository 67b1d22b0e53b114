use docsearch_logging::{search_info, search_warn};

use super::notify::{show_toast, Toast, ToastStyle};

/// Opens `url` in the default browser, reporting failure as a toast.
pub fn open_url(url: &str) {
    search_info!("opening {}", url);
    if let Err(err) = open::that(url) {
        search_warn!("failed to open {}: {}", url, err);
        let message = err.to_string();
        show_toast(&Toast::new(ToastStyle::Failure, "Could not open browser").message(&message));
    }
}
