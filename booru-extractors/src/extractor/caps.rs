use bitflags::bitflags;

bitflags! {
    /// Protocol quirks of an imageboard, exposed so callers never have to match on the site.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ExtractorFeatures: u8 {
        /// Requests can carry user credentials.
        const Auth = 0b0000_0001;
        /// The search query gets the duplicate suppression clause appended.
        ///
        /// Gelbooru is searched without it. Whether its API ignores those tags or they were
        /// simply never added there is unknown, so the difference is kept explicit here.
        const DuplicateFilter = 0b0000_0010;
    }
}
