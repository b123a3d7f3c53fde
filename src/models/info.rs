//! Display text for each model, in English and Chinese.

use super::ModelType;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// UI language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    En,
    /// Simplified Chinese.
    #[default]
    Zh,
}

impl FromStr for Language {
    type Err = std::convert::Infallible;

    /// Accepts BCP 47 tags such as `en-US` or `zh-CN`. Unrecognised tags fall
    /// back to Chinese.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let primary = tag.split(|c| c == '-' || c == '_').next().unwrap_or_default();
        Ok(if primary.eq_ignore_ascii_case("en") {
            Language::En
        } else {
            Language::Zh
        })
    }
}

/// Title block shown next to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    /// Short architecture name.
    pub title: &'static str,
    /// Full name in the selected language.
    pub subtitle: &'static str,
    /// One-paragraph description.
    pub description: &'static str,
}

pub(super) fn model_info(model: ModelType, language: Language) -> ModelInfo {
    use Language::*;
    use ModelType::*;

    let (title, subtitle, description) = match (model, language) {
        (Planar, Zh) => (
            "Planar MOSFET",
            "平面场效应晶体管",
            "传统的平面结构，电流在硅片表面的二维平面中流动。随着尺寸缩小，漏电流难以控制。",
        ),
        (Planar, En) => (
            "Planar MOSFET",
            "Planar field-effect transistor",
            "The classic flat structure: current flows in a two-dimensional layer at the \
             wafer surface. As dimensions shrink, leakage becomes hard to control.",
        ),
        (Soi, Zh) => (
            "SOI MOSFET",
            "绝缘体上硅场效应管",
            "在硅衬底和活性层之间增加了一层氧化埋层(BOX)，减少寄生电容和漏电流，适合低功耗应用。",
        ),
        (Soi, En) => (
            "SOI MOSFET",
            "Silicon-on-insulator field-effect transistor",
            "A buried oxide layer (BOX) separates the substrate from the active film, \
             reducing parasitic capacitance and leakage. Well suited to low-power designs.",
        ),
        (FinFet, Zh) => (
            "FinFET",
            "鳍式场效应晶体管",
            "将通道竖立起来形成\"鳍(Fin)\"，栅极三面包裹通道，极大增强了对电流的控制能力，是22nm-5nm节点的主流技术。",
        ),
        (FinFet, En) => (
            "FinFET",
            "Fin field-effect transistor",
            "The channel stands upright as a fin and the gate wraps it on three sides, \
             greatly improving control over the current. The mainstream technology from \
             the 22nm to the 5nm node.",
        ),
        (GaaFet, Zh) => (
            "GAAFET",
            "全环绕栅极场效应管",
            "栅极四面完全包裹通道（通常为纳米线或纳米片），提供极致的电流控制能力，是3nm及以下节点的关键技术。",
        ),
        (GaaFet, En) => (
            "GAAFET",
            "Gate-all-around field-effect transistor",
            "The gate surrounds the channel on all four sides, usually as nanowires or \
             nanosheets, giving the strongest possible control over the current. A key \
             technology at 3nm and below.",
        ),
    };

    ModelInfo {
        title,
        subtitle,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_tags() {
        assert_eq!("en-US".parse::<Language>().unwrap(), Language::En);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert_eq!("zh_CN".parse::<Language>().unwrap(), Language::Zh);
        assert_eq!("fr".parse::<Language>().unwrap(), Language::Zh);
    }

    #[test]
    fn test_titles_shared_across_languages() {
        for model in ModelType::ALL {
            let en = model.info(Language::En);
            let zh = model.info(Language::Zh);
            assert_eq!(en.title, zh.title);
            assert_ne!(en.subtitle, zh.subtitle);
            assert!(!zh.description.is_empty());
        }
        assert_eq!(ModelType::FinFet.info(Language::Zh).subtitle, "鳍式场效应晶体管");
    }
}
