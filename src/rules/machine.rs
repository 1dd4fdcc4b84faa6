//! Turn and phase state machine.
//!
//! ## Flow
//!
//! `WonderDraft1` -> `WonderDraft2` -> `AgePlay` (age 1) ->
//! `WaitingForStartPlayerChoice` -> `AgePlay` (age 2) -> ... -> `GameOver`.
//!
//! After every turn action and every interrupt choice, `settle` runs:
//! 1. Instant victory: military supremacy or enough distinct science symbols.
//! 2. Enter the next queued interrupt that offers a choice; skip the rest.
//! 3. Finish the turn: end the age if the pyramid is empty, otherwise give
//!    the same player an extra turn if one is pending, otherwise switch.
//!
//! Interrupts do not consume a turn; the turn finishes only once the last
//! interrupt is resolved.

use smallvec::SmallVec;

use crate::board::{Pyramid, PyramidLayout};
use crate::cards::{CardColor, CardId, Catalog, ProgressToken, ScienceSymbol, WonderId};
use crate::core::{
    Action, DuelConfig, GameEvent, GameState, Interrupt, Phase, PlayerId, TokenSelection,
};
use crate::effects::{EffectResolver, EffectSource, Resolution};
use crate::error::{DuelError, SetupError};

use super::cost::{card_cost, wonder_cost, Price};
use super::engine::{GameOutcome, VictoryType};
use super::scoring::{civilian_winner, score_all};

/// Wonders in each draft pool.
pub const DRAFT_POOL_SIZE: usize = 4;

/// Who picks each of the eight drafted wonders. Snake order in both rounds,
/// with player 1 opening the second round.
pub const DRAFT_ORDER: [PlayerId; 2 * DRAFT_POOL_SIZE] = [
    PlayerId::FIRST,
    PlayerId::SECOND,
    PlayerId::SECOND,
    PlayerId::FIRST,
    PlayerId::SECOND,
    PlayerId::FIRST,
    PlayerId::FIRST,
    PlayerId::SECOND,
];

/// Base coins for discarding a card; each owned yellow card adds one.
pub const DISCARD_BASE_COINS: u32 = 2;

/// Coins Urbanism grants for each card built through a chain.
pub const URBANISM_CHAIN_BONUS: u32 = 4;

fn structural(what: impl Into<String>) -> DuelError {
    DuelError::StructuralInconsistency(what.into())
}

// === Setup ===

/// Build the initial state: shuffle tokens, then wonders, and open the draft.
pub fn setup(catalog: &Catalog, config: &DuelConfig) -> Result<GameState, SetupError> {
    config.validate()?;
    check_catalog(catalog, config)?;

    let mut state = GameState::new(config.seed, config.starting_coins);

    let mut tokens = catalog.progress_tokens().to_vec();
    state.rng.shuffle(&mut tokens);
    let on_board = config.board_tokens.min(tokens.len());
    state.board_tokens = tokens[..on_board].iter().copied().collect();
    state.token_box = tokens[on_board..].iter().copied().collect();

    let mut wonders = catalog.wonder_ids();
    state.rng.shuffle(&mut wonders);
    state.draft_pool = wonders[..DRAFT_POOL_SIZE].iter().copied().collect();
    state.draft_reserve = wonders[DRAFT_POOL_SIZE..2 * DRAFT_POOL_SIZE].iter().copied().collect();
    state.removed_wonders = wonders[2 * DRAFT_POOL_SIZE..].iter().copied().collect();

    let event = GameEvent::DraftOpened {
        tokens: state.board_tokens.iter().copied().collect(),
        pool: state.draft_pool.iter().copied().collect(),
    };
    state.emit(event);
    Ok(state)
}

/// Reject catalogs that cannot fill the draft or the three pyramids.
fn check_catalog(catalog: &Catalog, config: &DuelConfig) -> Result<(), SetupError> {
    if catalog.wonder_count() < 2 * DRAFT_POOL_SIZE {
        return Err(SetupError::Catalog(format!(
            "the draft needs {} wonders, the catalog has {}",
            2 * DRAFT_POOL_SIZE,
            catalog.wonder_count()
        )));
    }

    let guilds = catalog.guilds().len();
    if guilds < config.guilds_per_game {
        return Err(SetupError::Catalog(format!(
            "{} guilds requested, the catalog has {guilds}",
            config.guilds_per_game
        )));
    }

    for age in 1..=3u8 {
        let layout = PyramidLayout::for_age(age).ok_or(SetupError::MalformedPyramid {
            age,
            reason: "no layout for this age".into(),
        })?;
        let available = catalog.age_cards(age).len();
        let kept = available.checked_sub(config.removed_per_age).ok_or_else(|| {
            SetupError::MalformedPyramid {
                age,
                reason: format!("{available} cards cannot lose {}", config.removed_per_age),
            }
        })?;
        let dealt = if age == 3 { kept + config.guilds_per_game } else { kept };
        if dealt != layout.slot_count() {
            return Err(SetupError::MalformedPyramid {
                age,
                reason: format!("{dealt} cards for {} slots", layout.slot_count()),
            });
        }
    }
    Ok(())
}

// === Actions ===

/// Apply an action that has already passed validation.
pub fn apply(
    catalog: &Catalog,
    config: &DuelConfig,
    state: &mut GameState,
    player: PlayerId,
    action: Action,
) -> Result<(), DuelError> {
    state.record(player, action);

    match action {
        Action::DraftWonder(wonder) => draft(catalog, config, state, player, wonder),

        Action::BuildCard(card) => {
            build_card(catalog, state, player, card)?;
            settle(catalog, config, state)
        }

        Action::DiscardCard(card) => {
            discard_card(catalog, state, player, card)?;
            settle(catalog, config, state)
        }

        Action::BuildWonder { wonder, tuck } => {
            build_wonder(catalog, config, state, player, wonder, tuck)?;
            settle(catalog, config, state)
        }

        Action::SelectToken(token) => {
            select_token(state, player, token)?;
            settle(catalog, config, state)
        }

        Action::DestroyCard(card) => {
            destroy_card(catalog, state, player, card)?;
            settle(catalog, config, state)
        }

        Action::RebuildFromDiscard(card) => {
            rebuild(catalog, state, player, card)?;
            settle(catalog, config, state)
        }

        Action::ChooseStartingPlayer(chosen) => {
            state.emit(GameEvent::StartPlayerChosen {
                chooser: player,
                chosen,
            });
            let next_age = state.age + 1;
            start_age(catalog, config, state, next_age, chosen)
        }
    }
}

fn draft(
    catalog: &Catalog,
    config: &DuelConfig,
    state: &mut GameState,
    player: PlayerId,
    wonder: WonderId,
) -> Result<(), DuelError> {
    let pos = state
        .draft_pool
        .index_of(&wonder)
        .ok_or_else(|| structural(format!("{wonder} is not in the draft pool")))?;
    state.draft_pool.remove(pos);
    state.players[player].add_wonder(wonder);
    state.emit(GameEvent::WonderDrafted { player, wonder });

    state.draft_picks += 1;
    match state.draft_picks {
        DRAFT_POOL_SIZE => {
            state.draft_pool = std::mem::take(&mut state.draft_reserve);
            state.phase = Phase::WonderDraft2;
            state.begin_turn(DRAFT_ORDER[DRAFT_POOL_SIZE]);
            Ok(())
        }
        n if n >= DRAFT_ORDER.len() => start_age(catalog, config, state, 1, PlayerId::FIRST),
        n => {
            state.begin_turn(DRAFT_ORDER[n]);
            Ok(())
        }
    }
}

/// Deduct a price, forwarding the trade part to an opponent holding Economy.
fn pay(state: &mut GameState, player: PlayerId, price: &Price) -> Result<(), DuelError> {
    state.players[player].pay(price.total())?;

    let opponent = player.opponent();
    if price.trade > 0 && state.players[opponent].has_token(ProgressToken::Economy) {
        state.players[opponent].gain_coins(price.trade);
        state.emit(GameEvent::CoinsGained {
            player: opponent,
            amount: price.trade,
        });
    }
    Ok(())
}

fn take_from_pyramid(state: &mut GameState, card: CardId) -> Result<(), DuelError> {
    let revealed = state
        .pyramid
        .take(card)
        .ok_or_else(|| structural(format!("{card} is not on the pyramid")))?;
    for card in revealed {
        state.emit(GameEvent::CardRevealed { card });
    }
    Ok(())
}

fn resolve(
    catalog: &Catalog,
    state: &mut GameState,
    player: PlayerId,
    source: EffectSource,
) -> Result<(), DuelError> {
    let resolution = EffectResolver::resolve(state, catalog, player, source)?;
    if let Resolution::Supremacy(winner) = resolution {
        end_game(catalog, state, VictoryType::Military, Some(winner));
    }
    Ok(())
}

fn build_card(
    catalog: &Catalog,
    state: &mut GameState,
    player: PlayerId,
    card: CardId,
) -> Result<(), DuelError> {
    let definition = catalog.card_checked(card)?;
    let price = card_cost(
        catalog,
        definition,
        &state.players[player],
        &state.players[player.opponent()],
    );
    pay(state, player, &price)?;
    take_from_pyramid(state, card)?;
    state.players[player].add_card(definition);
    state.emit(GameEvent::CardBuilt {
        player,
        card,
        cost: price.total(),
        chained: price.chained,
    });

    if price.chained && state.players[player].has_token(ProgressToken::Urbanism) {
        state.players[player].gain_coins(URBANISM_CHAIN_BONUS);
        state.emit(GameEvent::CoinsGained {
            player,
            amount: URBANISM_CHAIN_BONUS,
        });
    }

    resolve(catalog, state, player, EffectSource::Card(card))
}

fn discard_card(
    catalog: &Catalog,
    state: &mut GameState,
    player: PlayerId,
    card: CardId,
) -> Result<(), DuelError> {
    take_from_pyramid(state, card)?;
    let coins = DISCARD_BASE_COINS + state.players[player].count_color(catalog, CardColor::Yellow);
    state.players[player].gain_coins(coins);
    state.discard_pile.push_back(card);
    state.emit(GameEvent::CardDiscarded { player, card, coins });
    Ok(())
}

fn build_wonder(
    catalog: &Catalog,
    config: &DuelConfig,
    state: &mut GameState,
    player: PlayerId,
    wonder: WonderId,
    tuck: CardId,
) -> Result<(), DuelError> {
    let definition = catalog.wonder_checked(wonder)?;
    let price = wonder_cost(
        catalog,
        definition,
        &state.players[player],
        &state.players[player.opponent()],
    );
    pay(state, player, &price)?;
    take_from_pyramid(state, tuck)?;
    if !state.players[player].tuck(wonder, tuck) {
        return Err(structural(format!("{player} has no unbuilt {wonder}")));
    }
    state.emit(GameEvent::WonderBuilt {
        player,
        wonder,
        tucked: tuck,
        cost: price.total(),
    });

    if state.wonders_built() >= config.wonder_build_limit {
        let mut removed: SmallVec<[WonderId; 4]> = SmallVec::new();
        for p in PlayerId::BOTH {
            removed.extend(state.players[p].discard_unbuilt_wonders());
        }
        if !removed.is_empty() {
            state.removed_wonders.extend(removed.iter().copied());
            state.emit(GameEvent::WondersRemoved { wonders: removed });
        }
    }

    if state.players[player].has_token(ProgressToken::Theology) {
        state.extra_turn = true;
        state.emit(GameEvent::ExtraTurnGranted { player });
    }

    resolve(catalog, state, player, EffectSource::Wonder(wonder))
}

fn select_token(
    state: &mut GameState,
    player: PlayerId,
    token: ProgressToken,
) -> Result<(), DuelError> {
    match state.phase {
        Phase::WaitingForTokenSelection(TokenSelection::Pair) => {
            let pos = state
                .board_tokens
                .index_of(&token)
                .ok_or_else(|| structural(format!("{token} is not on the board")))?;
            state.board_tokens.remove(pos);
        }
        Phase::WaitingForTokenSelection(TokenSelection::Library) => {
            let pos = state
                .library_offer
                .index_of(&token)
                .ok_or_else(|| structural(format!("{token} was not drawn")))?;
            state.library_offer.remove(pos);
            let unchosen = std::mem::take(&mut state.library_offer);
            state.token_box.append(unchosen);
        }
        phase => return Err(structural(format!("token selection during {phase}"))),
    }

    let ledger = &mut state.players[player];
    ledger.add_token(token);
    let coins = token.coins_on_acquire();
    ledger.gain_coins(coins);
    let completes_pair = token == ProgressToken::Law && ledger.add_science(ScienceSymbol::Law);

    state.emit(GameEvent::TokenTaken { player, token });
    if coins > 0 {
        state.emit(GameEvent::CoinsGained { player, amount: coins });
    }
    if completes_pair {
        state.emit(GameEvent::SciencePairCompleted {
            player,
            symbol: ScienceSymbol::Law,
        });
        state.pending.push_back(Interrupt::SciencePair);
    }
    Ok(())
}

fn destroy_card(
    catalog: &Catalog,
    state: &mut GameState,
    player: PlayerId,
    card: CardId,
) -> Result<(), DuelError> {
    let owner = player.opponent();
    let definition = catalog.card_checked(card)?;
    if !state.players[owner].remove_card(catalog, definition) {
        return Err(structural(format!("{owner} does not own {card}")));
    }
    state.discard_pile.push_back(card);
    state.destruction_color = None;
    state.emit(GameEvent::CardDestroyed { owner, card });
    Ok(())
}

fn rebuild(
    catalog: &Catalog,
    state: &mut GameState,
    player: PlayerId,
    card: CardId,
) -> Result<(), DuelError> {
    let pos = state
        .discard_pile
        .index_of(&card)
        .ok_or_else(|| structural(format!("{card} is not in the discard pile")))?;
    state.discard_pile.remove(pos);
    let definition = catalog.card_checked(card)?;
    state.players[player].add_card(definition);
    state.emit(GameEvent::CardRebuilt { player, card });
    resolve(catalog, state, player, EffectSource::Card(card))
}

// === Transitions ===

/// Victory check, then interrupts, then turn end.
fn settle(catalog: &Catalog, config: &DuelConfig, state: &mut GameState) -> Result<(), DuelError> {
    if state.is_over() {
        return Ok(());
    }
    if let Some(winner) = state.military.supremacy() {
        end_game(catalog, state, VictoryType::Military, Some(winner));
        return Ok(());
    }
    let actor = state.current_player;
    let science_winner = [actor, actor.opponent()]
        .into_iter()
        .find(|&p| state.players[p].distinct_science() >= config.science_victory_symbols);
    if let Some(winner) = science_winner {
        end_game(catalog, state, VictoryType::Science, Some(winner));
        return Ok(());
    }

    while let Some(interrupt) = state.pending.pop_front() {
        if enter_interrupt(catalog, config, state, interrupt) {
            return Ok(());
        }
    }
    finish_turn(catalog, state)
}

/// Switch to the interrupt's phase. Returns false, leaving the phase alone,
/// when the interrupt offers no choice.
fn enter_interrupt(
    catalog: &Catalog,
    config: &DuelConfig,
    state: &mut GameState,
    interrupt: Interrupt,
) -> bool {
    let actor = state.current_player;
    let (phase, available) = match interrupt {
        Interrupt::SciencePair => (
            Phase::WaitingForTokenSelection(TokenSelection::Pair),
            !state.board_tokens.is_empty(),
        ),
        Interrupt::Library => (
            Phase::WaitingForTokenSelection(TokenSelection::Library),
            !state.token_box.is_empty(),
        ),
        Interrupt::Destroy(color) => (
            Phase::WaitingForDestruction,
            !state.cards_of_color(catalog, actor.opponent(), color).is_empty(),
        ),
        Interrupt::Rebuild => (Phase::WaitingForDiscardRebuild, !state.discard_pile.is_empty()),
    };

    if !available {
        state.emit(GameEvent::InterruptSkipped { player: actor, phase });
        return false;
    }

    match interrupt {
        Interrupt::Library => {
            let mut drawn: Vec<ProgressToken> = state.token_box.iter().copied().collect();
            state.rng.shuffle(&mut drawn);
            let count = config.library_draw.min(drawn.len());
            state.library_offer = drawn[..count].iter().copied().collect();
            state.token_box = drawn[count..].iter().copied().collect();
            state.emit(GameEvent::TokensOffered {
                player: actor,
                tokens: drawn[..count].iter().copied().collect(),
            });
        }
        Interrupt::Destroy(color) => {
            state.destruction_color = Some(color);
            state.emit(GameEvent::DestructionRequested { player: actor, color });
        }
        Interrupt::SciencePair | Interrupt::Rebuild => {}
    }
    state.phase = phase;
    true
}

fn finish_turn(catalog: &Catalog, state: &mut GameState) -> Result<(), DuelError> {
    if state.pyramid.is_cleared() {
        end_age(catalog, state);
        return Ok(());
    }

    state.phase = Phase::AgePlay;
    let actor = state.current_player;
    if state.extra_turn {
        state.extra_turn = false;
        state.begin_turn(actor);
    } else {
        state.begin_turn(actor.opponent());
    }
    Ok(())
}

fn end_age(catalog: &Catalog, state: &mut GameState) {
    state.extra_turn = false;

    if state.age >= 3 {
        let scores = score_all(catalog, state);
        let winner = civilian_winner(&scores);
        finish(state, GameOutcome {
            victory: VictoryType::Civilian,
            winner,
            scores,
        });
        return;
    }

    let chooser = state.military.trailing().unwrap_or(state.current_player);
    state.phase = Phase::WaitingForStartPlayerChoice;
    state.current_player = chooser;
    state.action_sequence = 0;
}

fn start_age(
    catalog: &Catalog,
    config: &DuelConfig,
    state: &mut GameState,
    age: u8,
    first: PlayerId,
) -> Result<(), DuelError> {
    let mut deck = catalog.age_cards(age);
    state.rng.shuffle(&mut deck);
    deck.truncate(deck.len().saturating_sub(config.removed_per_age));

    if age == 3 {
        let mut guilds = catalog.guilds();
        state.rng.shuffle(&mut guilds);
        guilds.truncate(config.guilds_per_game);
        deck.extend(guilds);
        state.rng.shuffle(&mut deck);
    }

    let layout = PyramidLayout::for_age(age).ok_or(SetupError::MalformedPyramid {
        age,
        reason: "no layout for this age".into(),
    })?;
    state.pyramid = Pyramid::from_layout(&layout, &deck, age)?;
    state.age = age;
    state.phase = Phase::AgePlay;
    state.extra_turn = false;
    state.pending.clear();
    state.emit(GameEvent::AgeStarted { age, first_player: first });
    state.begin_turn(first);
    Ok(())
}

fn end_game(
    catalog: &Catalog,
    state: &mut GameState,
    victory: VictoryType,
    winner: Option<PlayerId>,
) {
    let scores = score_all(catalog, state);
    finish(state, GameOutcome {
        victory,
        winner,
        scores,
    });
}

fn finish(state: &mut GameState, outcome: GameOutcome) {
    state.phase = Phase::GameOver;
    state.pending.clear();
    state.extra_turn = false;
    state.outcome = Some(outcome.clone());
    state.emit(GameEvent::GameEnded { outcome });
}
