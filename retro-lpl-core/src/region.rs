/// Release regions encoded in the last character of a GameCube game code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// USA / North America
    Usa,
    /// Japan
    Japan,
    /// Europe (PAL)
    Europe,
    /// France and the Benelux countries
    FranceHolland,
    /// Germany (Nintendo of Europe)
    Germany,
    /// Spain
    Spain,
    /// France
    France,
    /// Italy
    Italy,
    /// Netherlands
    Holland,
}

impl Region {
    /// Returns the suffix used in serials (e.g. `DL-DOL-GALE-USA`).
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usa => "USA",
            Self::Japan => "JPN",
            Self::Europe => "EUR",
            Self::FranceHolland => "FAH",
            Self::Germany => "NOE",
            Self::Spain => "ESP",
            Self::France => "FRA",
            Self::Italy => "ITA",
            Self::Holland => "HOL",
        }
    }

    /// Returns the full name of this region.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Usa => "USA",
            Self::Japan => "Japan",
            Self::Europe => "Europe",
            Self::FranceHolland => "France/Holland",
            Self::Germany => "Germany",
            Self::Spain => "Spain",
            Self::France => "France",
            Self::Italy => "Italy",
            Self::Holland => "Holland",
        }
    }

    /// Parse the region letter of a game code. Case-sensitive; letters outside
    /// the table have no region.
    pub fn from_code_char(c: char) -> Option<Self> {
        match c {
            'E' => Some(Self::Usa),
            'J' => Some(Self::Japan),
            'P' | 'X' => Some(Self::Europe),
            'Y' => Some(Self::FranceHolland),
            'D' => Some(Self::Germany),
            'S' => Some(Self::Spain),
            'F' => Some(Self::France),
            'I' => Some(Self::Italy),
            'H' => Some(Self::Holland),
            _ => None,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
