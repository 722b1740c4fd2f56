use axum::http::Uri;
use foodgram_shared::{Page, PageArgs};
use serde::Serialize;
use url::Url;

use super::AppState;
use crate::config::ServerConfig;

/// Page-number pagination body with absolute links to the neighbour pages.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl AppState {
    pub fn paginate<T>(&self, uri: &Uri, args: PageArgs, page: Page<T>) -> Paginated<T> {
        paginate(&self.config.server, uri, self.page(args), page)
    }
}

fn paginate<T>(
    server: &ServerConfig,
    uri: &Uri,
    (limit, offset): (u64, u64),
    page: Page<T>,
) -> Paginated<T> {
    let current = offset / limit + 1;

    let next = if offset + limit < page.count {
        page_link(server, uri, current + 1)
    } else {
        None
    };
    let previous = if current > 1 {
        page_link(server, uri, current - 1)
    } else {
        None
    };

    Paginated {
        count: page.count,
        next,
        previous,
        results: page.results,
    }
}

/// Request URL on the public host with `page` replaced. The first page
/// carries no `page` parameter.
fn page_link(server: &ServerConfig, uri: &Uri, page: u64) -> Option<String> {
    let mut url = match Url::parse(&server.public_link(uri.path())) {
        Ok(url) => url,
        Err(err) => {
            tracing::warn!(err = %err, "invalid public url");
            return None;
        }
    };

    let pairs = url::form_urlencoded::parse(uri.query().unwrap_or_default().as_bytes())
        .into_owned()
        .filter(|(key, _)| key != "page")
        .collect::<Vec<_>>();

    url.set_query(None);
    if !pairs.is_empty() || page > 1 {
        let mut query = url.query_pairs_mut();
        query.extend_pairs(pairs);
        if page > 1 {
            query.append_pair("page", &page.to_string());
        }
    }

    Some(url.into())
}
