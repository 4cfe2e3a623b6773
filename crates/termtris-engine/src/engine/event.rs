/// Notable things that happened during a game step.
///
/// The engine queues these instead of producing sound or output itself; the
/// front end drains them after each step and decides how to present them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant, derive_more::Display)]
pub enum GameEvent {
    /// One to three lines were cleared.
    #[display("line clear")]
    LineClear,
    /// Four lines were cleared at once.
    #[display("tetris")]
    TetrisClear,
    #[display("level up")]
    LevelUp,
    /// A piece settled because gravity could not move it further.
    #[display("lock")]
    Lock,
    #[display("soft drop")]
    SoftDrop,
    #[display("hard drop")]
    HardDrop,
    #[display("game over")]
    GameOver,
    /// A run started; background music may begin.
    #[display("background start")]
    BackgroundStart,
    /// A run ended; background music should stop.
    #[display("background stop")]
    BackgroundStop,
}
