// NovaBrowse services
// Stateless helpers and loaders: input resolution, home document, shell configuration.

pub mod home_page;
pub mod navigation;
pub mod shell_config;
