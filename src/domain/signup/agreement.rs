//! Agreement checkboxes with an "agree to all" umbrella flag
//!
//! The umbrella flag is always the AND of the three sub-flags. Writing a
//! sub-flag re-derives it, writing the umbrella fans out to every sub-flag.

use serde::{Deserialize, Serialize};

/// Which agreement checkbox is being toggled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgreementKind {
    Terms,
    Privacy,
    Marketing,
    All,
}

/// `all` value implied by the three sub-flags
pub fn derive_all(terms: bool, privacy: bool, marketing: bool) -> bool {
    terms && privacy && marketing
}

/// Agreement flags after the umbrella flag was set to `value`
pub fn fan_out_all(value: bool) -> Agreements {
    Agreements {
        all: value,
        terms: value,
        privacy: value,
        marketing: value,
    }
}

/// Raw checkbox values as submitted, possibly inconsistent
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AgreementFlags {
    is_all_agree: bool,
    is_terms_agree: bool,
    is_privacy_agree: bool,
    is_marketing_agree: bool,
}

/// Consistent set of agreement flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "AgreementFlags")]
pub struct Agreements {
    #[serde(rename = "isAllAgree")]
    all: bool,
    #[serde(rename = "isTermsAgree")]
    terms: bool,
    #[serde(rename = "isPrivacyAgree")]
    privacy: bool,
    #[serde(rename = "isMarketingAgree")]
    marketing: bool,
}

impl From<AgreementFlags> for Agreements {
    // The submitted umbrella value is ignored, it is derived from the sub-flags
    fn from(flags: AgreementFlags) -> Self {
        Self::new(
            flags.is_terms_agree,
            flags.is_privacy_agree,
            flags.is_marketing_agree,
        )
    }
}

impl Agreements {
    pub fn new(terms: bool, privacy: bool, marketing: bool) -> Self {
        Self {
            all: derive_all(terms, privacy, marketing),
            terms,
            privacy,
            marketing,
        }
    }

    /// Apply a checkbox write, returning the new consistent flags
    pub fn toggle(self, kind: AgreementKind, value: bool) -> Self {
        match kind {
            AgreementKind::All => fan_out_all(value),
            AgreementKind::Terms => Self::new(value, self.privacy, self.marketing),
            AgreementKind::Privacy => Self::new(self.terms, value, self.marketing),
            AgreementKind::Marketing => Self::new(self.terms, self.privacy, value),
        }
    }

    pub fn all(&self) -> bool {
        self.all
    }

    pub fn terms(&self) -> bool {
        self.terms
    }

    pub fn privacy(&self) -> bool {
        self.privacy
    }

    pub fn marketing(&self) -> bool {
        self.marketing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_consistent(a: &Agreements) {
        assert_eq!(a.all(), derive_all(a.terms(), a.privacy(), a.marketing()));
    }

    #[test]
    fn test_derive_all() {
        assert!(derive_all(true, true, true));
        assert!(!derive_all(true, true, false));
        assert!(!derive_all(false, true, true));
        assert!(!derive_all(false, false, false));
    }

    #[test]
    fn test_fan_out_all() {
        let on = fan_out_all(true);
        assert!(on.all() && on.terms() && on.privacy() && on.marketing());

        let off = fan_out_all(false);
        assert!(!off.all() && !off.terms() && !off.privacy() && !off.marketing());
    }

    #[test]
    fn test_toggle_all_sets_every_flag() {
        let agreements = Agreements::default().toggle(AgreementKind::All, true);

        assert_eq!(agreements, Agreements::new(true, true, true));
        assert!(agreements.all());
    }

    #[test]
    fn test_clearing_sub_flag_clears_all() {
        let agreements = fan_out_all(true).toggle(AgreementKind::Marketing, false);

        assert!(!agreements.all());
        assert!(agreements.terms());
        assert!(agreements.privacy());
        assert!(!agreements.marketing());
    }

    #[test]
    fn test_setting_last_sub_flag_sets_all() {
        let agreements = Agreements::default()
            .toggle(AgreementKind::Terms, true)
            .toggle(AgreementKind::Privacy, true);
        assert!(!agreements.all());

        let agreements = agreements.toggle(AgreementKind::Marketing, true);
        assert!(agreements.all());
    }

    #[test]
    fn test_invariant_holds_over_toggle_sequences() {
        let kinds = [
            AgreementKind::Terms,
            AgreementKind::Privacy,
            AgreementKind::Marketing,
            AgreementKind::All,
        ];
        let mut agreements = Agreements::default();

        for (i, kind) in kinds.iter().cycle().take(32).enumerate() {
            agreements = agreements.toggle(*kind, i % 3 != 0);
            assert_consistent(&agreements);
        }
    }

    #[test]
    fn test_deserialize_rederives_all() {
        let json = r#"{"isAllAgree": true, "isTermsAgree": true, "isPrivacyAgree": false}"#;
        let agreements: Agreements = serde_json::from_str(json).unwrap();

        assert!(!agreements.all());
        assert!(agreements.terms());
        assert!(!agreements.privacy());
        assert!(!agreements.marketing());
    }

    #[test]
    fn test_serialize_uses_form_keys() {
        let json = serde_json::to_value(fan_out_all(true)).unwrap();

        assert_eq!(json["isAllAgree"], true);
        assert_eq!(json["isMarketingAgree"], true);
    }
}
