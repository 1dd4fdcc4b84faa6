//! Typed game log.
//!
//! Every state transition appends one or more `GameEvent`s to the log kept in
//! `GameState`. `Duel::process` hands back the events an action produced and
//! observers receive them one by one, so the log doubles as the engine's
//! structured trace.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardColor, CardId, ProgressToken, ScienceSymbol, WonderId};
use crate::rules::GameOutcome;

use super::phase::Phase;
use super::player::PlayerId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Setup finished: tokens on the board and the first draft pool.
    DraftOpened {
        tokens: SmallVec<[ProgressToken; 5]>,
        pool: SmallVec<[WonderId; 4]>,
    },
    WonderDrafted {
        player: PlayerId,
        wonder: WonderId,
    },
    AgeStarted {
        age: u8,
        first_player: PlayerId,
    },
    /// A face-down pyramid card turned face-up.
    CardRevealed {
        card: CardId,
    },
    CardBuilt {
        player: PlayerId,
        card: CardId,
        /// Coins paid, trading included.
        cost: u32,
        chained: bool,
    },
    CardDiscarded {
        player: PlayerId,
        card: CardId,
        coins: u32,
    },
    WonderBuilt {
        player: PlayerId,
        wonder: WonderId,
        tucked: CardId,
        cost: u32,
    },
    /// The build limit was reached; these unbuilt wonders left the game.
    WondersRemoved {
        wonders: SmallVec<[WonderId; 4]>,
    },
    CoinsGained {
        player: PlayerId,
        amount: u32,
    },
    CoinsLost {
        player: PlayerId,
        amount: u32,
    },
    MilitaryMoved {
        player: PlayerId,
        shields: u8,
        position: i8,
    },
    Looted {
        victim: PlayerId,
        threshold: i8,
        lost: u32,
    },
    SciencePairCompleted {
        player: PlayerId,
        symbol: ScienceSymbol,
    },
    /// Tokens drawn from the box for a library choice.
    TokensOffered {
        player: PlayerId,
        tokens: SmallVec<[ProgressToken; 3]>,
    },
    TokenTaken {
        player: PlayerId,
        token: ProgressToken,
    },
    DestructionRequested {
        player: PlayerId,
        color: CardColor,
    },
    CardDestroyed {
        owner: PlayerId,
        card: CardId,
    },
    CardRebuilt {
        player: PlayerId,
        card: CardId,
    },
    /// An interrupt was queued but offered no legal choice.
    InterruptSkipped {
        player: PlayerId,
        phase: Phase,
    },
    ExtraTurnGranted {
        player: PlayerId,
    },
    TurnStarted {
        player: PlayerId,
        turn: u32,
    },
    StartPlayerChosen {
        chooser: PlayerId,
        chosen: PlayerId,
    },
    GameEnded {
        outcome: GameOutcome,
    },
}
