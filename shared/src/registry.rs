use crate::facet::FacetId;

/// One renderer per facet.
///
/// The only constructor is [`RendererRegistry::from_fn`], which asks for a
/// renderer for every [`FacetId`]. Callers write an exhaustive `match`, so a
/// new facet without a renderer fails to compile at the registration site.
pub struct RendererRegistry<R> {
    renderers: [R; FacetId::COUNT],
}

impl<R> RendererRegistry<R> {
    pub fn from_fn(mut renderer_for: impl FnMut(FacetId) -> R) -> Self {
        Self {
            renderers: std::array::from_fn(|index| renderer_for(FacetId::ALL[index])),
        }
    }

    pub fn get(&self, facet: FacetId) -> &R {
        &self.renderers[facet.ordinal()]
    }

    /// Lookup by facet key. `None` means the caller dispatched a facet this
    /// shell does not know.
    pub fn get_by_key(&self, key: &str) -> Option<&R> {
        key.parse::<FacetId>().ok().map(|facet| self.get(facet))
    }

    pub fn iter(&self) -> impl Iterator<Item = (FacetId, &R)> {
        FacetId::ALL.into_iter().zip(self.renderers.iter())
    }
}
