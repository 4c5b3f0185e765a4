use typed_builder::TypedBuilder;

pub const DEFAULT_POPULAR_LIMIT: usize = 5;
pub const DEFAULT_RELATED_LIMIT: usize = 3;

#[derive(Debug, Clone, TypedBuilder)]
pub struct GatewayConfig {
    /// Require the admin cookie on mutating routes.
    #[builder(default = false)]
    pub admin_gate: bool,
    #[builder(default = DEFAULT_POPULAR_LIMIT)]
    pub popular_limit: usize,
    /// Default size of the related and random suggestion lists.
    #[builder(default = DEFAULT_RELATED_LIMIT)]
    pub related_limit: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
