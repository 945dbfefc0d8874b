//! Banner schema versions.

/// Schema variant of a banner collection. Each version lives in its own file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerVersion {
    V1,
    V2,
}

impl BannerVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            BannerVersion::V1 => "V1",
            BannerVersion::V2 => "V2",
        }
    }
}

impl std::fmt::Display for BannerVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
