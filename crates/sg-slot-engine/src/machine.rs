//! SlotMachine — spin orchestrator
//!
//! Sole owner of the ledger and the session. Every suspension is a
//! [`Tick`] in the machine's [`Scheduler`]; the host moves virtual time
//! forward with [`SlotMachine::advance_by`] or [`SlotMachine::step`].
//!
//! ```text
//! request_spin ──debit──▶ Spinning ──frame × N──▶ candidate ──roll──┬─▶ normal: multiplier + evaluate ─┐
//!                                                                    └─▶ Bonus: fade → lock ticks ─────┤
//!                                                                                                      v
//!                              Idle ◀── auto-play pause ◀── finalize (credit once, big win, stats) ◀───┘
//! ```

use log::{debug, info, warn};
use rand_chacha::ChaCha8Rng;

use crate::animator::{AnimationStep, SpinAnimator};
use crate::bonus::{BonusEvent, BonusEventState, LockStep, resolve_forced_win, resolve_settle};
use crate::config::MachineConfig;
use crate::entropy::{EntropySource, seeded_entropy};
use crate::error::SlotResult;
use crate::grid::{CellSet, Grid};
use crate::ledger::Ledger;
use crate::money::Credits;
use crate::multiplier::Multiplier;
use crate::observer::{FrameKind, FrameNotice, NullObserver, SpinObserver};
use crate::outcome::{BigWinPresentation, ForcedOutcome, Resolution, SpinOutcome, SpinRequest};
use crate::paytable::{Evaluation, evaluate};
use crate::scheduler::{Scheduler, TimerId};
use crate::session::{ActiveSpin, SessionFlags, SessionPhase, Tick};
use crate::stats::SessionStats;
use crate::timing::{TimingConfig, TimingProfile};
use sg_stage::{Stage, StageEvent};

/// The slot machine
pub struct SlotMachine<O: SpinObserver = NullObserver, E: EntropySource = ChaCha8Rng> {
    config: MachineConfig,
    ledger: Ledger,
    phase: SessionPhase,
    flags: SessionFlags,
    scheduler: Scheduler<Tick>,
    entropy: E,
    observer: O,

    grid: Grid,
    highlighted: CellSet,
    current_multiplier: Option<Multiplier>,
    bonus_state: BonusEventState,
    big_win: Option<BigWinPresentation>,

    auto_play_timer: Option<TimerId>,
    big_win_timer: Option<TimerId>,

    next_spin_id: u64,
    stats: SessionStats,
    last_outcome: Option<SpinOutcome>,
}

impl SlotMachine {
    /// Create a machine with no observer
    pub fn new(config: MachineConfig) -> SlotResult<Self> {
        Self::with_observer(config, NullObserver)
    }
}

impl<O: SpinObserver> SlotMachine<O, ChaCha8Rng> {
    /// Create a machine with the default entropy stream (seeded from
    /// config when a seed is set)
    pub fn with_observer(config: MachineConfig, observer: O) -> SlotResult<Self> {
        let entropy = seeded_entropy(config.seed);
        Self::with_entropy(config, observer, entropy)
    }
}

impl<O: SpinObserver, E: EntropySource> SlotMachine<O, E> {
    /// Create a machine with an explicit entropy source
    pub fn with_entropy(config: MachineConfig, observer: O, mut entropy: E) -> SlotResult<Self> {
        config.validate()?;
        let ledger = config.ledger();
        let grid = Grid::random(&mut entropy);

        info!(
            "Slot machine ready: balance {} wager {}",
            ledger.balance(),
            ledger.wager()
        );

        Ok(Self {
            config,
            ledger,
            phase: SessionPhase::Idle,
            flags: SessionFlags::default(),
            scheduler: Scheduler::new(),
            entropy,
            observer,
            grid,
            highlighted: CellSet::new(),
            current_multiplier: None,
            bonus_state: BonusEventState::none(),
            big_win: None,
            auto_play_timer: None,
            big_win_timer: None,
            next_spin_id: 1,
            stats: SessionStats::default(),
            last_outcome: None,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SPIN REQUESTS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Request a spin
    pub fn request_spin(&mut self) -> SpinRequest {
        self.start_spin(ForcedOutcome::default())
    }

    /// Request a spin with pinned draws
    pub fn request_spin_forced(&mut self, forced: ForcedOutcome) -> SpinRequest {
        self.start_spin(forced)
    }

    fn start_spin(&mut self, forced: ForcedOutcome) -> SpinRequest {
        match self.phase {
            SessionPhase::TornDown => return SpinRequest::TornDown,
            SessionPhase::Spinning { .. } | SessionPhase::Bonus { .. } => {
                debug!("Spin request ignored: spin in flight");
                return SpinRequest::InFlight;
            }
            SessionPhase::Idle => {}
        }

        let balance_before = self.ledger.balance();
        let wager = match self.ledger.debit() {
            Ok(wager) => wager,
            Err(err) => {
                warn!("Spin refused: {}", err);
                self.stats.record_refusal();
                self.emit(
                    Stage::SpinRefused {
                        balance: balance_before.as_decimal(),
                        wager: self.ledger.wager().as_decimal(),
                    },
                    None,
                );
                self.stop_auto_play();
                return SpinRequest::Refused {
                    balance: balance_before,
                    wager: self.ledger.wager(),
                };
            }
        };

        if let Some(timer) = self.auto_play_timer.take() {
            self.scheduler.cancel(timer);
        }
        self.highlighted.clear();
        self.clear_big_win();
        self.bonus_state = BonusEventState::none();

        let id = self.next_spin_id;
        self.next_spin_id += 1;

        let timing = self.timing().clone();
        let animator = SpinAnimator::new(timing.frame_count);
        self.scheduler.schedule(timing.frame_delay_ms, Tick::AnimationFrame);

        info!(
            "Spin {} started: wager {} balance {} ({})",
            id,
            wager,
            self.ledger.balance(),
            timing.profile.display_name()
        );
        self.emit(
            Stage::SpinStart {
                wager: wager.as_decimal(),
                balance: self.ledger.balance().as_decimal(),
            },
            Some(id),
        );

        self.phase = SessionPhase::Spinning {
            spin: ActiveSpin {
                id,
                wager,
                balance_before,
                started_at_ms: self.scheduler.now_ms(),
                timing,
                forced,
            },
            animator,
        };
        SpinRequest::Started { spin_id: id }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PLAYER SETTINGS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Set the wager from free-form input (two decimals, minimum 1)
    ///
    /// A spin in flight keeps the wager it was debited with.
    pub fn set_wager(&mut self, value: f64) -> Credits {
        if self.is_torn_down() {
            return self.ledger.wager();
        }
        let wager = self.ledger.set_wager(value);
        if !value.is_finite() || (wager.as_decimal() - value).abs() >= 0.005 {
            warn!("Wager input {} normalised to {}", value, wager);
        }
        wager
    }

    pub fn increment_wager(&mut self) -> Credits {
        if self.is_torn_down() {
            return self.ledger.wager();
        }
        self.ledger.increment_wager()
    }

    pub fn decrement_wager(&mut self) -> Credits {
        if self.is_torn_down() {
            return self.ledger.wager();
        }
        self.ledger.decrement_wager()
    }

    /// Switch timing profile; a running spin keeps its own timing
    pub fn set_turbo(&mut self, turbo: bool) {
        if !self.is_torn_down() {
            self.flags.turbo = turbo;
        }
    }

    /// Toggle auto-play
    ///
    /// Switching on while idle starts a spin right away and returns its
    /// request. Switching off cancels a pending auto-play spin but never a
    /// spin that is already running.
    pub fn set_auto_play(&mut self, on: bool) -> Option<SpinRequest> {
        if self.is_torn_down() {
            return None;
        }
        if !on {
            self.stop_auto_play();
            return None;
        }

        self.flags.auto_play = true;
        if self.phase.is_idle() && self.auto_play_timer.is_none() {
            Some(self.request_spin())
        } else {
            None
        }
    }

    /// Quick shuffle: redraw the displayed grid while idle
    pub fn shuffle(&mut self) -> bool {
        if !self.phase.is_idle() {
            return false;
        }
        let grid = Grid::random(&mut self.entropy);
        self.highlighted.clear();
        self.show(grid, FrameKind::Shuffle, None);
        true
    }

    /// Cancel every timer and refuse further input
    ///
    /// A spin in flight is abandoned: its wager stays debited.
    pub fn teardown(&mut self) {
        if self.is_torn_down() {
            return;
        }
        let dropped = self.scheduler.cancel_all();
        if let Some(spin) = self.phase.active_spin() {
            warn!("Teardown abandoned spin {} (wager {})", spin.id, spin.wager);
        }
        info!("Slot machine torn down ({} timers cancelled)", dropped);
        self.auto_play_timer = None;
        self.big_win_timer = None;
        self.flags.auto_play = false;
        self.big_win = None;
        self.bonus_state = BonusEventState::none();
        self.phase = SessionPhase::TornDown;
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // TIME
    // ═══════════════════════════════════════════════════════════════════════════

    /// Fire the next pending timer, jumping time to its deadline
    pub fn step(&mut self) -> bool {
        match self.scheduler.pop_next() {
            Some(fired) => {
                self.dispatch(fired.message);
                true
            }
            None => false,
        }
    }

    /// Advance virtual time, firing every timer that falls due
    pub fn advance_by(&mut self, ms: u64) -> usize {
        let target = self.scheduler.now_ms().saturating_add(ms);
        let mut fired = 0;
        while let Some(timer) = self.scheduler.pop_due(target) {
            self.dispatch(timer.message);
            fired += 1;
        }
        self.scheduler.advance_to(target);
        fired
    }

    /// Step until no timer is pending or `max_ticks` have fired
    pub fn run_until_idle(&mut self, max_ticks: usize) -> usize {
        let mut fired = 0;
        while fired < max_ticks && self.step() {
            fired += 1;
        }
        fired
    }

    /// Step until the spin in flight resolves
    pub fn finish_spin(&mut self) -> Option<SpinOutcome> {
        if !self.phase.in_flight() {
            return None;
        }
        while self.phase.in_flight() {
            if !self.step() {
                break;
            }
        }
        self.last_outcome.clone()
    }

    /// Deadline of the next pending timer
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // OBSERVERS
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn balance(&self) -> Credits {
        self.ledger.balance()
    }

    pub fn wager(&self) -> Credits {
        self.ledger.wager()
    }

    pub fn last_win(&self) -> Credits {
        self.ledger.last_win()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn current_multiplier(&self) -> Option<Multiplier> {
        self.current_multiplier
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn highlighted_cells(&self) -> &CellSet {
        &self.highlighted
    }

    pub fn bonus_event_state(&self) -> BonusEventState {
        self.bonus_state
    }

    pub fn big_win_presentation(&self) -> Option<&BigWinPresentation> {
        self.big_win.as_ref()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn last_outcome(&self) -> Option<&SpinOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.phase.in_flight()
    }

    pub fn is_torn_down(&self) -> bool {
        matches!(self.phase, SessionPhase::TornDown)
    }

    pub fn auto_play(&self) -> bool {
        self.flags.auto_play
    }

    pub fn turbo(&self) -> bool {
        self.flags.turbo
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_count()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // TICK HANDLING
    // ═══════════════════════════════════════════════════════════════════════════

    fn dispatch(&mut self, tick: Tick) {
        match (std::mem::take(&mut self.phase), tick) {
            (SessionPhase::Spinning { spin, animator }, Tick::AnimationFrame) => {
                self.on_animation_frame(spin, animator);
            }
            (
                SessionPhase::Bonus {
                    spin, mut event, ..
                },
                Tick::BonusFadeSpin,
            ) => {
                let grid = event.fade_spin(&mut self.entropy);
                debug!("Spin {} bonus fade spin {}", spin.id, event.fade_spins());
                self.show(grid, FrameKind::BonusFade, Some(spin.id));
                self.emit(Stage::BonusFadeSpin, Some(spin.id));
                let fade_timer = Some(
                    self.scheduler
                        .schedule(self.config.bonus.fade_interval_ms, Tick::BonusFadeSpin),
                );
                self.phase = SessionPhase::Bonus {
                    spin,
                    event,
                    fade_timer,
                };
            }
            (
                SessionPhase::Bonus {
                    spin,
                    mut event,
                    fade_timer,
                },
                Tick::BonusActivate,
            ) => {
                if let Some(timer) = fade_timer {
                    self.scheduler.cancel(timer);
                }
                event.activate(&self.config.bonus);
                self.bonus_state = event.state();
                info!(
                    "Spin {} bonus active: target {} with {} spins",
                    spin.id,
                    event.target().name(),
                    event.spins_remaining()
                );
                self.emit(
                    Stage::BonusActivate {
                        spins_remaining: event.spins_remaining(),
                    },
                    Some(spin.id),
                );
                self.scheduler
                    .schedule(self.config.bonus.lock_interval_ms, Tick::BonusLock);
                self.phase = SessionPhase::Bonus {
                    spin,
                    event,
                    fade_timer: None,
                };
            }
            (SessionPhase::Bonus { spin, event, .. }, Tick::BonusLock) => {
                self.on_bonus_lock(spin, event);
            }
            (phase, Tick::AutoPlay) => {
                self.phase = phase;
                self.auto_play_timer = None;
                if self.flags.auto_play {
                    self.request_spin();
                }
            }
            (phase, Tick::BigWinDismiss) => {
                self.phase = phase;
                self.big_win_timer = None;
                self.clear_big_win();
            }
            (phase, tick) => {
                debug!("Ignoring {:?} in phase {}", tick, phase.name());
                self.phase = phase;
            }
        }
    }

    fn on_animation_frame(&mut self, spin: ActiveSpin, mut animator: SpinAnimator) {
        match animator.tick(&mut self.entropy) {
            AnimationStep::Frame { index, grid } => {
                self.show_animation_frame(&spin, &animator, index, grid);
                self.scheduler
                    .schedule(spin.timing.frame_delay_ms, Tick::AnimationFrame);
                self.phase = SessionPhase::Spinning { spin, animator };
            }
            AnimationStep::Final {
                index,
                frame,
                candidate,
            } => {
                self.show_animation_frame(&spin, &animator, index, frame);
                let candidate = spin.forced.grid.unwrap_or(candidate);
                self.show(candidate, FrameKind::Settled, Some(spin.id));
                self.emit(Stage::SpinSettled, Some(spin.id));
                self.resolve_candidate(spin, candidate);
            }
        }
    }

    fn show_animation_frame(
        &mut self,
        spin: &ActiveSpin,
        animator: &SpinAnimator,
        index: u32,
        grid: Grid,
    ) {
        let count = animator.frame_count();
        debug!("Spin {} frame {}/{}", spin.id, index + 1, count);
        self.show(grid, FrameKind::Animation { index, count }, Some(spin.id));
        self.emit(
            Stage::ReelFrame {
                frame_index: index,
                frame_count: count,
            },
            Some(spin.id),
        );
    }

    fn resolve_candidate(&mut self, spin: ActiveSpin, candidate: Grid) {
        let bonus = match spin.forced.bonus {
            Some(forced) => forced,
            None => self.config.bonus.triggers(self.entropy.unit()),
        };
        if bonus {
            self.enter_bonus(spin);
            return;
        }

        let multiplier = match spin.forced.multiplier {
            Some(forced) => forced,
            None => self.config.multiplier.draw(&mut self.entropy),
        };
        self.current_multiplier = multiplier;
        self.emit(
            Stage::MultiplierDrawn {
                multiplier: multiplier.map(Multiplier::factor),
            },
            Some(spin.id),
        );

        let evaluation = evaluate(&candidate, spin.wager, multiplier);
        self.finalize(spin, candidate, evaluation, Resolution::Normal);
    }

    fn enter_bonus(&mut self, spin: ActiveSpin) {
        let event = match spin.forced.bonus_target {
            Some(target) => BonusEvent::with_target(target),
            None => BonusEvent::enter(&mut self.entropy),
        };
        self.current_multiplier = None;
        self.bonus_state = event.state();

        info!(
            "Spin {} entered bonus event: target {}",
            spin.id,
            event.target().name()
        );
        self.emit(
            Stage::BonusEnter {
                target: event.target().name().to_string(),
            },
            Some(spin.id),
        );

        // Activation is scheduled first so it wins a tie with a fade spin
        let bonus = &self.config.bonus;
        self.scheduler
            .schedule(bonus.fade_duration_ms, Tick::BonusActivate);
        let fade_timer = Some(
            self.scheduler
                .schedule(bonus.fade_interval_ms, Tick::BonusFadeSpin),
        );

        self.phase = SessionPhase::Bonus {
            spin,
            event,
            fade_timer,
        };
    }

    fn on_bonus_lock(&mut self, spin: ActiveSpin, mut event: BonusEvent) {
        let current = self.grid;
        let step = event.lock_tick(&current, &mut self.entropy);
        let grid = *step.grid();
        let locked = grid.count_where(|s| event.is_locked(s)) as u8;

        debug!(
            "Spin {} bonus lock: {} cells held, {} spins left",
            spin.id,
            locked,
            event.spins_remaining()
        );
        self.show(
            grid,
            FrameKind::BonusLock {
                spins_remaining: event.spins_remaining(),
            },
            Some(spin.id),
        );
        self.emit(
            Stage::BonusLock {
                spins_remaining: event.spins_remaining(),
                locked_cells: locked,
            },
            Some(spin.id),
        );

        let target = event.target();
        match step {
            LockStep::Continue(_) => {
                self.bonus_state = event.state();
                self.scheduler
                    .schedule(self.config.bonus.lock_interval_ms, Tick::BonusLock);
                self.phase = SessionPhase::Bonus {
                    spin,
                    event,
                    fade_timer: None,
                };
            }
            LockStep::ForcedWin(grid) => {
                let evaluation = resolve_forced_win(&grid, spin.wager, &self.config.bonus);
                self.exit_bonus(&spin, true, evaluation.payout);
                self.finalize(spin, grid, evaluation, Resolution::BonusForcedWin { target });
            }
            LockStep::Settle(grid) => {
                let evaluation = resolve_settle(&grid, spin.wager);
                self.exit_bonus(&spin, false, evaluation.payout);
                self.finalize(spin, grid, evaluation, Resolution::BonusSettle { target });
            }
        }
    }

    fn exit_bonus(&mut self, spin: &ActiveSpin, forced_win: bool, payout: Credits) {
        info!(
            "Spin {} bonus event over: {} paying {}",
            spin.id,
            if forced_win { "forced win" } else { "settled" },
            payout
        );
        self.emit(
            Stage::BonusExit {
                forced_win,
                win_amount: payout.as_decimal(),
            },
            Some(spin.id),
        );
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // FINALIZATION
    // ═══════════════════════════════════════════════════════════════════════════

    fn finalize(
        &mut self,
        spin: ActiveSpin,
        grid: Grid,
        evaluation: Evaluation,
        resolution: Resolution,
    ) {
        let payout = evaluation.payout;
        self.ledger.settle(payout);
        let balance_after = self.ledger.balance();
        assert_eq!(
            spin.balance_before - spin.wager + payout,
            balance_after,
            "ledger out of balance after spin {}",
            spin.id
        );

        self.grid = grid;
        self.highlighted = evaluation.winning_cells.clone();
        self.bonus_state = BonusEventState::none();

        let effective_multiplier = payout.ratio_to(spin.wager);
        let tier = self.config.big_win.tier_for(effective_multiplier);
        let now = self.scheduler.now_ms();

        if evaluation.is_win() {
            self.emit(
                Stage::WinPresent {
                    win_amount: payout.as_decimal(),
                    line_count: evaluation.line_count() as u8,
                },
                Some(spin.id),
            );
        }
        if let Some(tier) = tier {
            let dismiss_after = spin.timing.big_win_display_ms;
            self.big_win = Some(BigWinPresentation {
                tier,
                effective_multiplier,
                payout,
                shown_at_ms: now,
                dismiss_at_ms: now.saturating_add(dismiss_after),
            });
            self.big_win_timer = Some(self.scheduler.schedule(dismiss_after, Tick::BigWinDismiss));
            info!("Spin {} {}: x{:.2}", spin.id, tier, effective_multiplier);
            self.emit(
                Stage::BigWinStart {
                    tier,
                    effective_multiplier,
                },
                Some(spin.id),
            );
        }

        info!(
            "Spin {} resolved: payout {} ({} lines) balance {}",
            spin.id,
            payout,
            evaluation.line_count(),
            balance_after
        );
        self.emit(
            Stage::SpinEnd {
                win_amount: payout.as_decimal(),
                balance: balance_after.as_decimal(),
            },
            Some(spin.id),
        );

        let outcome = SpinOutcome {
            spin_id: spin.id,
            wager: spin.wager,
            grid,
            payout,
            winning_cells: evaluation.winning_cells,
            line_wins: evaluation.line_wins,
            multiplier: evaluation.multiplier,
            resolution,
            balance_before: spin.balance_before,
            balance_after,
            effective_multiplier,
            big_win: tier,
            started_at_ms: spin.started_at_ms,
            resolved_at_ms: now,
        };
        self.stats.record(&outcome);
        self.observer.on_spin_complete(&outcome);
        self.last_outcome = Some(outcome);
        self.phase = SessionPhase::Idle;

        if self.flags.auto_play && self.ledger.can_cover() {
            let pause = self.timing().auto_play_pause_ms;
            debug!("Auto-play: next spin in {}ms", pause);
            self.auto_play_timer = Some(self.scheduler.schedule(pause, Tick::AutoPlay));
        } else {
            self.stop_auto_play();
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // HELPERS
    // ═══════════════════════════════════════════════════════════════════════════

    fn timing(&self) -> &TimingConfig {
        self.config
            .timing
            .get(TimingProfile::from_turbo(self.flags.turbo))
    }

    fn stop_auto_play(&mut self) {
        if let Some(timer) = self.auto_play_timer.take() {
            self.scheduler.cancel(timer);
        }
        if self.flags.auto_play {
            self.flags.auto_play = false;
            info!("Auto-play stopped");
            self.emit(Stage::AutoPlayStopped, None);
        }
    }

    fn clear_big_win(&mut self) {
        if let Some(timer) = self.big_win_timer.take() {
            self.scheduler.cancel(timer);
        }
        if let Some(presentation) = self.big_win.take() {
            self.emit(
                Stage::BigWinEnd {
                    tier: presentation.tier,
                },
                self.last_outcome.as_ref().map(|o| o.spin_id),
            );
        }
    }

    fn show(&mut self, grid: Grid, kind: FrameKind, spin_id: Option<u64>) {
        self.grid = grid;
        let notice = FrameNotice {
            spin_id,
            kind,
            grid,
            timestamp_ms: self.scheduler.now_ms(),
        };
        self.observer.on_frame(&notice);
    }

    fn emit(&mut self, stage: Stage, spin_id: Option<u64>) {
        let event = StageEvent::new(stage, self.scheduler.now_ms()).with_spin(spin_id);
        self.observer.on_stage(&event);
    }
}

impl<O: SpinObserver, E: EntropySource> std::fmt::Debug for SlotMachine<O, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotMachine")
            .field("phase", &self.phase.name())
            .field("balance", &self.ledger.balance())
            .field("wager", &self.ledger.wager())
            .field("flags", &self.flags)
            .field("now_ms", &self.scheduler.now_ms())
            .finish()
    }
}
