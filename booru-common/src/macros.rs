/// Builds a `reqwest::Client` carrying the user agent of the given [`Booru`](crate::Booru).
///
/// Expands to a `Result`, so the caller decides how a TLS backend failure is reported.
#[macro_export]
macro_rules! client {
    ($x:expr) => {{
        $crate::reqwest::Client::builder()
            .user_agent($x.user_agent())
            .build()
    }};
}
