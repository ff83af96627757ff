// Job Catalog: fetching, normalization hand-off, filtering and facet menus.

pub mod client;
pub mod facets;
pub mod filter;
pub mod handlers;
