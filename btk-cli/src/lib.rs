use std::ops::Deref;

use btk_core::preset::OutputPreset;
use clap::ValueEnum;

pub use clap;

pub mod cli;
pub mod config;
pub mod error;
pub mod output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct PresetArg(pub OutputPreset);

impl ValueEnum for PresetArg {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self(OutputPreset::Any),
            Self(OutputPreset::Danbooru),
            Self(OutputPreset::AIBooru),
            Self(OutputPreset::E621),
            Self(OutputPreset::Gelbooru),
        ]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        let value = clap::builder::PossibleValue::new(self.0.as_str());
        Some(match self.0 {
            OutputPreset::Any => {
                value.help("Pick the service from the URL and show every tag category")
            }
            OutputPreset::Danbooru => value.help("Always use Danbooru"),
            OutputPreset::AIBooru => value.help("Always use AIBooru, including model tags"),
            OutputPreset::E621 => {
                value.help("Always use e621/e6ai, including species and contributor tags")
            }
            OutputPreset::Gelbooru => value.help("Always use Gelbooru, which only has merged tags"),
        })
    }
}

impl Deref for PresetArg {
    type Target = OutputPreset;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
