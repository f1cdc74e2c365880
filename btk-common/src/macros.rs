/// Builds a [`Client`](reqwest::Client) with a set User-Agent and request timeout.
///
/// Evaluates to `Result<Client, reqwest::Error>`.
#[macro_export]
macro_rules! client {
    ($ua:expr, $timeout:expr) => {{
        $crate::reqwest::Client::builder()
            .user_agent($ua)
            .timeout($timeout)
            .build()
    }};
}

/// Joins a list of tag tokens in the common `tag_a, tag_b` format.
#[macro_export]
macro_rules! join_tags {
    ($x:expr) => {{
        let tl = $x.join(", ");
        tl
    }};
}
