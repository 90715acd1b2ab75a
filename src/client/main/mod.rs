mod authorizer;
mod refresh;

pub use authorizer::ApiClient;
pub use refresh::RefreshController;
