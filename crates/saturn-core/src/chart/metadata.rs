use serde::{Deserialize, Serialize};

/// Scalar chart properties from the `#TAG value` header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartMetadata {
    pub level: f32,
    pub clear_threshold: f32,
    /// Audio offset in seconds.
    pub audio_offset: f32,
    /// Background movie offset in seconds.
    pub movie_offset: f32,
    pub preview_time: f32,
    pub preview_length: f32,
    pub music_file_path: String,
    pub author: String,
}

/// Header tags the parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataTag {
    Level,
    ClearThreshold,
    AudioOffset,
    MovieOffset,
    PreviewTime,
    PreviewLength,
    MusicFilePath,
    Author,
}

impl MetadataTag {
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = match tag.to_ascii_uppercase().as_str() {
            "LEVEL" | "DIFFICULTY" => Self::Level,
            "CLEAR_THRESHOLD" => Self::ClearThreshold,
            "OFFSET" => Self::AudioOffset,
            "MOVIEOFFSET" => Self::MovieOffset,
            "PREVIEW_TIME" => Self::PreviewTime,
            "PREVIEW_LENGTH" => Self::PreviewLength,
            "MUSIC_FILE_PATH" => Self::MusicFilePath,
            "AUTHOR" => Self::Author,
            _ => return None,
        };
        Some(tag)
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, Self::MusicFilePath | Self::Author)
    }
}

impl ChartMetadata {
    /// Numeric field for a tag, `None` for text tags.
    pub(crate) fn numeric_field(&mut self, tag: MetadataTag) -> Option<&mut f32> {
        match tag {
            MetadataTag::Level => Some(&mut self.level),
            MetadataTag::ClearThreshold => Some(&mut self.clear_threshold),
            MetadataTag::AudioOffset => Some(&mut self.audio_offset),
            MetadataTag::MovieOffset => Some(&mut self.movie_offset),
            MetadataTag::PreviewTime => Some(&mut self.preview_time),
            MetadataTag::PreviewLength => Some(&mut self.preview_length),
            MetadataTag::MusicFilePath | MetadataTag::Author => None,
        }
    }

    pub(crate) fn text_field(&mut self, tag: MetadataTag) -> Option<&mut String> {
        match tag {
            MetadataTag::MusicFilePath => Some(&mut self.music_file_path),
            MetadataTag::Author => Some(&mut self.author),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_lookup() {
        assert_eq!(MetadataTag::from_tag("LEVEL"), Some(MetadataTag::Level));
        assert_eq!(MetadataTag::from_tag("difficulty"), Some(MetadataTag::Level));
        assert_eq!(MetadataTag::from_tag("OFFSET"), Some(MetadataTag::AudioOffset));
        assert_eq!(MetadataTag::from_tag("MUSIC_SCORE_ID"), None);
        assert!(!MetadataTag::Author.is_numeric());
        assert!(MetadataTag::MovieOffset.is_numeric());
    }
}
