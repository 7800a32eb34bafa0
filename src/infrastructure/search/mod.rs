mod serper_search_provider;

pub use serper_search_provider::SerperSearchProvider;
