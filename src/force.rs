use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};


// Side of the board. Serialized as the lowercase literals the remote authority expects in
// URLs ("white" / "black").
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, Display,
    EnumString, IntoStaticStr, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Force {
    White,
    Black,
}

impl Force {
    pub fn opponent(self) -> Force {
        match self {
            Force::White => Force::Black,
            Force::Black => Force::White,
        }
    }

    pub fn to_wire(self) -> &'static str { self.into() }

    pub fn to_piece_prefix(self) -> char {
        match self {
            Force::White => 'w',
            Force::Black => 'b',
        }
    }
    pub fn from_piece_prefix(ch: char) -> Option<Self> {
        match ch {
            'w' => Some(Force::White),
            'b' => Some(Force::Black),
            _ => None,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_literals() {
        assert_eq!(Force::White.to_wire(), "white");
        assert_eq!(Force::Black.to_string(), "black");
        assert_eq!("WHITE".parse::<Force>().unwrap(), Force::White);
        assert_eq!(serde_json::to_string(&Force::Black).unwrap(), "\"black\"");
        assert!("red".parse::<Force>().is_err());
    }
}
