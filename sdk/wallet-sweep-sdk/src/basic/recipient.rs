use crate::error::{Result, SweepSdkError};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Parse user-supplied recipient text into an address. No network access.
pub fn parse_recipient(text: &str) -> Result<Pubkey> {
    Pubkey::from_str(text).map_err(|e| SweepSdkError::InvalidRecipient(format!("{text:?}: {e}")))
}

/// Parse `text` and reject the swept wallet itself as a recipient.
///
/// Stricter than [`parse_recipient`], which accepts any well-formed address
/// including the owner's. [`Sweeper`](crate::Sweeper) uses this variant, so
/// a sweep to self fails as `InvalidRecipient` before any network call.
///
/// Sweeping into your own associated token accounts would close them right
/// after crediting them, which the token program rejects.
pub fn parse_recipient_for(owner: &Pubkey, text: &str) -> Result<Pubkey> {
    let recipient = parse_recipient(text)?;
    if recipient == *owner {
        return Err(SweepSdkError::InvalidRecipient(
            "recipient is the connected wallet".to_string(),
        ));
    }
    Ok(recipient)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_recipient() {
        let pk = Pubkey::new_unique();
        assert_eq!(parse_recipient(&pk.to_string()).unwrap(), pk);
    }

    #[test]
    fn test_parse_invalid_recipient() {
        for text in ["", "not-an-address", "0OIl", "11111111111111111111111111111111111111111111111"] {
            let err = parse_recipient(text).unwrap_err();
            assert!(
                matches!(err, SweepSdkError::InvalidRecipient(_)),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_recipient_must_differ_from_owner() {
        let owner = Pubkey::new_unique();
        assert!(matches!(
            parse_recipient_for(&owner, &owner.to_string()),
            Err(SweepSdkError::InvalidRecipient(_))
        ));
        assert!(parse_recipient_for(&owner, &Pubkey::new_unique().to_string()).is_ok());
        assert_eq!(parse_recipient(&owner.to_string()).unwrap(), owner);
    }
}
