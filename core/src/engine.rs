use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    Ready,
    Active,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Ready
    }
}

/// One full game: the ground truth, the player's view of it, and the state
/// machine tying both together. Winning flags whatever is still hidden, so
/// the final board always shows every mine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    mines: MineBoard,
    player: PlayerBoard,
    state: GameState,
    triggered_mine: Option<Pos>,
}

impl Game {
    pub fn new(mines: MineBoard) -> Self {
        let (rows, cols) = mines.size();
        let player = PlayerBoard::new(rows, cols).expect("mine board dimensions are non-zero");
        Self {
            mines,
            player,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn from_config<G: BoardGenerator>(config: GameConfig, generator: G) -> Result<Self> {
        Ok(Self::new(generator.generate(config)?))
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Board shape as `(rows, cols)`.
    pub fn size(&self) -> Pos {
        self.mines.size()
    }

    pub fn total_mines(&self) -> usize {
        self.mines.mine_count()
    }

    /// Mines minus flags; negative when the player has over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.mines.mine_count() as isize) - (self.player.flagged_count() as isize)
    }

    pub fn player(&self) -> &PlayerBoard {
        &self.player
    }

    pub fn cell(&self, pos: Pos) -> Result<PlayerCell> {
        self.player.cell(pos)
    }

    pub fn triggered_mine(&self) -> Option<Pos> {
        self.triggered_mine
    }

    pub fn reveal(&mut self, pos: Pos) -> Result<RevealOutcome> {
        self.check_not_finished()?;

        match self.player.reveal(&self.mines, pos) {
            Ok(RevealOutcome::Won) => {
                self.state = GameState::Won;
                let flagged = self.player.flag_all_hidden();
                log::debug!("game won, auto-flagged {} remaining mines", flagged);
                Ok(RevealOutcome::Won)
            }
            Ok(outcome) => {
                if outcome.has_update() {
                    self.mark_started();
                }
                Ok(outcome)
            }
            Err(GameError::Lost) => {
                self.state = GameState::Lost;
                self.triggered_mine = Some(pos);
                log::debug!("game lost, mine triggered at {:?}", pos);
                Err(GameError::Lost)
            }
            Err(other) => Err(other),
        }
    }

    pub fn flag(&mut self, pos: Pos) -> Result<MarkOutcome> {
        self.check_not_finished()?;

        let outcome = self.player.flag(pos)?;
        if outcome.has_update() {
            self.mark_started();
        }
        Ok(outcome)
    }

    fn mark_started(&mut self) {
        if matches!(self.state, GameState::Ready) {
            self.state = GameState::Active;
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
