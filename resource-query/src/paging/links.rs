//! Navigation link construction

use super::ResourceParameters;

/// Which page a link should address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceUriType {
    /// The page before the current one
    PreviousPage,
    /// The page after the current one
    NextPage,
    /// The current page
    Current,
}

impl ResourceUriType {
    /// Parameters addressing this page relative to `params`
    ///
    /// # Example
    ///
    /// ```rust
    /// use resource_query::paging::{ResourceParameters, ResourceUriType};
    ///
    /// let params = ResourceParameters::new().with_page_number(2);
    /// assert_eq!(ResourceUriType::NextPage.target(&params).page_number(), 3);
    /// assert_eq!(ResourceUriType::PreviousPage.target(&params).page_number(), 1);
    /// ```
    pub fn target(self, params: &ResourceParameters) -> ResourceParameters {
        let page = params.page_number();
        match self {
            Self::PreviousPage => params.for_page(page.saturating_sub(1)),
            Self::NextPage => params.for_page(page.saturating_add(1)),
            Self::Current => params.clone(),
        }
    }
}

/// Builds a URL for a set of collection parameters
///
/// Implemented for any `Fn(&ResourceParameters) -> Option<String>`.
pub trait LinkBuilder {
    /// URL addressing `params`, or `None` when no link can be built
    fn link(&self, params: &ResourceParameters) -> Option<String>;

    /// URL addressing the page `kind` relative to `params`
    fn link_for(&self, params: &ResourceParameters, kind: ResourceUriType) -> Option<String> {
        self.link(&kind.target(params))
    }
}

impl<F> LinkBuilder for F
where
    F: Fn(&ResourceParameters) -> Option<String>,
{
    fn link(&self, params: &ResourceParameters) -> Option<String> {
        self(params)
    }
}
