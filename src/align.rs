/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AlignX {
    #[default]
    Start,
    Center,
    End,
}

/// Vertical alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AlignY {
    #[default]
    Start,
    Center,
    End,
}

impl AlignX {
    /// Parses an alignment keyword, falling back to `Start` on anything unknown.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "start" | "left" => Self::Start,
            "center" => Self::Center,
            "end" | "right" => Self::End,
            other => {
                log::warn!("unknown x-alignment keyword {other:?}, defaulting to start");
                Self::Start
            }
        }
    }
}

impl AlignY {
    /// Parses an alignment keyword, falling back to `Start` on anything unknown.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "start" | "top" => Self::Start,
            "center" => Self::Center,
            "end" | "bottom" => Self::End,
            other => {
                log::warn!("unknown y-alignment keyword {other:?}, defaulting to start");
                Self::Start
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn keyword_parsing_falls_back_to_start() {
        assert_eq!(AlignX::from_keyword("center"), AlignX::Center);
        assert_eq!(AlignX::from_keyword("right"), AlignX::End);
        assert_eq!(AlignX::from_keyword("sideways"), AlignX::Start);
        assert_eq!(AlignY::from_keyword("bottom"), AlignY::End);
        assert_eq!(AlignY::from_keyword(""), AlignY::Start);
    }
}
