//! Script catalog — product templates, tone overrides, and the agent persona.
//!
//! The active script is always derived: take the product's default script
//! and lay the tone's partial override on top of it.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

use super::model::{Script, ScriptPatch};

/// Products the studio has call templates for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductId {
    HomeLoan,
    CreditCard,
    MutualFunds,
}

impl ProductId {
    pub const ALL: [ProductId; 3] = [Self::HomeLoan, Self::CreditCard, Self::MutualFunds];

    /// Short label used in the script designer dropdown.
    pub fn label(&self) -> &'static str {
        match self {
            Self::HomeLoan => "Home Loan Advisory",
            Self::CreditCard => "Credit Card Upsell",
            Self::MutualFunds => "Mutual Fund SIP",
        }
    }

    /// Campaign name shown on the persona card and simulator header.
    pub fn campaign_label(&self) -> &'static str {
        match self {
            Self::HomeLoan => "Wishfin Home Loan Concierge",
            Self::CreditCard => "Wishfin Credit Card Upgrade",
            Self::MutualFunds => "Wishfin SIP Booster",
        }
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::HomeLoan
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::HomeLoan => "home-loan",
            Self::CreditCard => "credit-card",
            Self::MutualFunds => "mutual-funds",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ProductId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home-loan" => Ok(Self::HomeLoan),
            "credit-card" => Ok(Self::CreditCard),
            "mutual-funds" => Ok(Self::MutualFunds),
            other => Err(CatalogError::UnknownProduct(other.to_string())),
        }
    }
}

/// Delivery tones. A tone overrides some or all of the product script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneId {
    Consultative,
    Energetic,
    Concise,
}

impl ToneId {
    pub const ALL: [ToneId; 3] = [Self::Consultative, Self::Energetic, Self::Concise];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Consultative => "Consultative",
            Self::Energetic => "Energetic",
            Self::Concise => "Concise",
        }
    }

    /// One-line description of how the agent should sound.
    pub fn talk_track(&self) -> &'static str {
        match self {
            Self::Energetic => "High-energy, optimistic, drives urgency",
            Self::Concise => "Straight to the point, respects time",
            Self::Consultative => "Guided advisor, nurtures trust",
        }
    }
}

impl Default for ToneId {
    fn default() -> Self {
        Self::Consultative
    }
}

impl std::fmt::Display for ToneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Consultative => "consultative",
            Self::Energetic => "energetic",
            Self::Concise => "concise",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ToneId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "consultative" => Ok(Self::Consultative),
            "energetic" => Ok(Self::Energetic),
            "concise" => Ok(Self::Concise),
            other => Err(CatalogError::UnknownTone(other.to_string())),
        }
    }
}

/// Coaching prompts shown next to the persona.
pub const QUICK_PROMPTS: [&str; 3] = [
    "Highlight 0% processing fee campaign",
    "Position instant approval with documentation concierge",
    "Address rate comparison and trust Wishfin's partner network",
];

/// Default script for a product.
pub fn product_script(product: ProductId) -> Script {
    match product {
        ProductId::HomeLoan => Script::new(
            "Hi, I am Priya calling from Wishfin. Thank you for showing interest in optimising your home loan. Is this a good time to speak?",
            "Great! May I confirm the loan amount you are targeting and whether this is for a new purchase, a balance transfer, or a top-up? How far along are you in selecting a property? What are the key criteria you have in mind when choosing a lender?",
            "Based on what you shared, we can line up three curated offers with pre-approved rates in the next 24 hours. Wishfin works with 75+ lenders and handles documentation end-to-end so you do not lose momentum. Our AI engine analyses your profile to highlight the lowest rate plus hidden charges others often miss.",
            "I will drop a secure link on WhatsApp and email where you can upload documents in minutes. Shall we schedule a quick callback tomorrow at your preferred time to walk through the offers together?",
        ),
        ProductId::CreditCard => Script::new(
            "Hello! This is Arjun from Wishfin. I noticed you recently explored premium credit card upgrades. I can help you unlock a card that rewards your spends better — is now a good time?",
            "Perfect. What kind of spends dominate your monthly usage — travel, online shopping, dining? Do you prefer milestone benefits like fee reversals or direct cashback? Are you currently paying an annual fee on your existing card?",
            "With your profile, I see two cards that elevate your benefits by 3x. One offers airport lounge access plus concierge, the other gives 5% assured cashback on digital spends. Wishfin handles the instant approval journey so you avoid bank branch visits.",
            "I can have a curated comparison table delivered to you in five minutes. Which perk appeals more — travel privileges or high cashback? I'll line up the e-sign journey accordingly.",
        ),
        ProductId::MutualFunds => Script::new(
            "Hi, calling from Wishfin investments. Thanks for engaging with our SIP booster planner. Are you available for a quick conversation?",
            "Wonderful. What monthly investment amount are you comfortable setting aside right now? Do you have any specific goals — maybe a home upgrade, children's education, or building a retirement corpus? How long have you already been investing in mutual funds?",
            "Our planner identifies funds aligned with your goals and risk appetite, adjusting allocations dynamically. Clients using this see up to 22% better SIP performance because we rebalance proactively and eliminate underperformers.",
            "I'll email a personalised blueprint with recommended funds and monthly schedule. Shall we book a 15-minute session this week to walk you through and set up the SIP automation?",
        ),
    }
}

/// Partial override a tone applies on top of the product script.
pub fn tone_patch(tone: ToneId) -> ScriptPatch {
    match tone {
        ToneId::Consultative => ScriptPatch {
            opener: Some(
                "Hi, this is Priya from Wishfin. I wanted to personally help you evaluate the best option. Have you got a moment right now?".into(),
            ),
            pitch: Some(
                "After understanding your priorities, I'll shortlist a couple of tailored solutions and highlight the trade-offs so you can make a confident call.".into(),
            ),
            ..Default::default()
        },
        ToneId::Energetic => ScriptPatch {
            opener: Some(
                "Hey there! Priya from Wishfin. I am excited to share a quick win for you — can I grab your attention for a minute?".into(),
            ),
            pitch: Some(
                "Here is the exciting part — we can get you a decision within hours, so you're moving faster than the market.".into(),
            ),
            ..Default::default()
        },
        ToneId::Concise => ScriptPatch {
            opener: Some(
                "Hi, Priya from Wishfin. I can help you wrap this up quickly — have a minute?".into(),
            ),
            discovery: Some("Let me confirm your requirement and timeline.".into()),
            pitch: Some("I’ll send a short list of top-fit options today itself.".into()),
            closing: Some("Can I schedule the next action right away?".into()),
        },
    }
}

/// The active script for a product/tone pair.
pub fn derive_script(product: ProductId, tone: ToneId) -> Script {
    product_script(product).merged_with(&tone_patch(tone))
}

/// Voice identity the agent presents for the current campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub name: &'static str,
    pub role: &'static str,
    pub campaign: &'static str,
    pub tone: &'static str,
    pub talk_track: &'static str,
}

impl Persona {
    pub fn derive(product: ProductId, tone: ToneId) -> Self {
        Self {
            name: if tone == ToneId::Energetic { "Arjun" } else { "Priya" },
            role: "Wishfin Growth Advisor",
            campaign: product.campaign_label(),
            tone: tone.label(),
            talk_track: tone.talk_track(),
        }
    }
}

/// Header line for the simulator, e.g. `"Wishfin SIP Booster • Concise tone"`.
pub fn simulator_summary(product: ProductId, tone: ToneId) -> String {
    format!("{} • {} tone", product.campaign_label(), tone.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_roundtrip_through_display() {
        for product in ProductId::ALL {
            assert_eq!(product.to_string().parse::<ProductId>().unwrap(), product);
        }
        for tone in ToneId::ALL {
            assert_eq!(tone.to_string().parse::<ToneId>().unwrap(), tone);
        }
    }

    #[test]
    fn unknown_ids_are_rejected() {
        assert!(matches!(
            "car-loan".parse::<ProductId>(),
            Err(CatalogError::UnknownProduct(_))
        ));
        assert!(matches!(
            "pushy".parse::<ToneId>(),
            Err(CatalogError::UnknownTone(_))
        ));
    }

    #[test]
    fn display_matches_serde() {
        for product in ProductId::ALL {
            let json = serde_json::to_string(&product).unwrap();
            assert_eq!(json, format!("\"{product}\""));
        }
        for tone in ToneId::ALL {
            let json = serde_json::to_string(&tone).unwrap();
            assert_eq!(json, format!("\"{tone}\""));
        }
    }

    #[test]
    fn consultative_keeps_product_discovery_and_closing() {
        let base = product_script(ProductId::CreditCard);
        let script = derive_script(ProductId::CreditCard, ToneId::Consultative);
        assert_eq!(script.discovery, base.discovery);
        assert_eq!(script.closing, base.closing);
        assert_ne!(script.opener, base.opener);
        assert!(script.opener.starts_with("Hi, this is Priya"));
    }

    #[test]
    fn concise_overrides_every_field() {
        for product in ProductId::ALL {
            let script = derive_script(product, ToneId::Concise);
            assert_eq!(script.discovery, "Let me confirm your requirement and timeline.");
            assert_eq!(script.closing, "Can I schedule the next action right away?");
        }
    }

    #[test]
    fn persona_name_follows_tone() {
        assert_eq!(Persona::derive(ProductId::HomeLoan, ToneId::Energetic).name, "Arjun");
        assert_eq!(Persona::derive(ProductId::HomeLoan, ToneId::Concise).name, "Priya");
        let persona = Persona::derive(ProductId::MutualFunds, ToneId::Consultative);
        assert_eq!(persona.campaign, "Wishfin SIP Booster");
        assert_eq!(persona.talk_track, "Guided advisor, nurtures trust");
    }

    #[test]
    fn summary_names_campaign_and_tone() {
        assert_eq!(
            simulator_summary(ProductId::HomeLoan, ToneId::Energetic),
            "Wishfin Home Loan Concierge • Energetic tone"
        );
    }
}
