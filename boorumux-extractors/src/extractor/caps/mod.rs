use bitflags::bitflags;

bitflags! {
    /// What a [`Booru`](crate::extractor::Booru) is able to do.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BooruFeatures: u8 {
        /// Can list posts matching a tag query.
        const TAG_SEARCH = 0b0000_0001;
        /// Can fetch a single post by its id.
        const SINGLE_POST_FETCH = 0b0000_0010;
        /// Reports how many pages are left after a search.
        const PAGE_COUNT = 0b0000_0100;
    }
}

impl BooruFeatures {
    /// Features of an aggregate source: it can only search.
    pub const AGGREGATE: Self = Self::TAG_SEARCH;
}
