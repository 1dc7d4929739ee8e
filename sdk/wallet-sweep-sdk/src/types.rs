use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;

/// A token account held by the swept wallet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenHolding {
    /// Address of the token account itself
    pub address: Pubkey,

    /// Mint of the token held
    pub mint: Pubkey,

    /// Raw balance in base units
    pub amount: u64,
}

impl TokenHolding {
    pub fn new(address: Pubkey, mint: Pubkey, amount: u64) -> Self {
        Self {
            address,
            mint,
            amount,
        }
    }

    /// Check if there is anything to move out before closing
    pub fn is_empty(&self) -> bool {
        self.amount == 0
    }
}

/// Recent blockhash together with the last block height it stays valid for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockhashAnchor {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}
