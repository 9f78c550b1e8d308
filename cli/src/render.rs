use core::fmt::Write;
use fieldsweep_core::*;

fn tile_char(view: TileView) -> char {
    match view {
        TileView::Hidden => '.',
        TileView::Marked => 'F',
        TileView::Open(0) => ' ',
        TileView::Open(n) => char::from(b'0' + n),
        TileView::Mine => '*',
    }
}

/// Grid with row and column numbers, one character per tile.
pub fn board(field: &Minefield) -> String {
    let (rows, cols) = field.size();
    let width = rows.saturating_sub(1).max(cols.saturating_sub(1)).to_string().len();
    let mut out = String::new();

    let _ = write!(out, "{:width$} ", "");
    for col in 0..cols {
        let _ = write!(out, " {col:>width$}");
    }
    out.push('\n');

    for row in 0..rows {
        let _ = write!(out, "{row:>width$} ");
        for col in 0..cols {
            let view = field[(row, col)].view();
            let _ = write!(out, " {:>width$}", tile_char(view));
        }
        out.push('\n');
    }
    out
}

/// Level, mine counter, clock and game state on one line.
pub fn status(session: &GameSession) -> String {
    let field = session.minefield();
    let state = match (session.state(), session.clock().state()) {
        (SessionState::Won, _) => "won",
        (SessionState::Lost, _) => "lost",
        (SessionState::Playing, ClockState::Paused) => "paused",
        (SessionState::Playing, _) => "playing",
    };
    format!(
        "{} {} | mines left {} | time {} | {state}",
        session.level(),
        session.params(),
        field.mines_remaining(),
        session.clock().display(),
    )
}

pub fn scores(ledger: &ScoreLedger, level: Level) -> String {
    let mut out = format!("{level} best times\n");
    for (rank, score) in ledger.scores(level).iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {score}", rank + 1);
    }
    out
}
