use crate::utils::*;
use clap::Args;
use sweeper_core as game;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

pub trait HasUpdate {
    fn has_update(self) -> bool;
}

impl HasUpdate for game::Result<game::MarkOutcome> {
    fn has_update(self) -> bool {
        match self {
            Ok(outcome) => outcome.has_update(),
            Err(err) => {
                log::warn!("flag rejected: {}", err);
                false
            }
        }
    }
}

impl HasUpdate for game::Result<game::RevealOutcome> {
    fn has_update(self) -> bool {
        match self {
            Ok(outcome) => outcome.has_update(),
            Err(err) => {
                log::warn!("dig rejected: {}", err);
                false
            }
        }
    }
}

/// CSS classes for a cell, `a1`..`a8` select the colour of the count.
fn cell_classes(view: game::CellView) -> Classes {
    use game::CellView::*;
    match view {
        Hidden => classes!("unrevealed"),
        Revealed(0) => classes!("revealed"),
        Revealed(count) => classes!("revealed", format!("a{}", count)),
        Flagged => classes!("flagged"),
        Mine => classes!("mine"),
    }
}

fn cell_text(view: game::CellView) -> Option<String> {
    match view {
        game::CellView::Revealed(count) if count > 0 => Some(count.to_string()),
        _ => None,
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum CellMsg {
    Dig(game::Coord2),
    Flag(game::Coord2),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    NewGame,
    SelectDifficulty(game::Difficulty),
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    row: game::Coord,
    col: game::Coord,
    view: game::CellView,
    callback: Callback<CellMsg>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        row,
        col,
        view,
        callback,
    } = props.clone();

    let onclick = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            log::trace!("({}, {}) primary click", row, col);
            callback.emit(CellMsg::Dig((row, col)));
        })
    };

    let oncontextmenu = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        log::trace!("({}, {}) secondary click", row, col);
        callback.emit(CellMsg::Flag((row, col)));
    });

    html! {
        <td
            id={format!("row{}col{}", row, col)}
            data-row={row.to_string()}
            data-col={col.to_string()}
            class={cell_classes(view)}
            {onclick}
            {oncontextmenu}
        >
            { for cell_text(view) }
        </td>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<String>,

    /// Difficulty of the first game: EASY, MEDIUM or HARD
    #[arg(short, long)]
    pub difficulty: Option<game::Difficulty>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: game::Session,
    snapshot: game::Snapshot,
}

impl GameView {
    fn new(session: game::Session) -> Self {
        let snapshot = session.engine().snapshot();
        Self { session, snapshot }
    }

    /// Takes a fresh snapshot, returns whether anything visible changed.
    fn refresh(&mut self) -> bool {
        let snapshot = self.session.engine().snapshot();
        let changes = snapshot.changes_since(&self.snapshot);
        let state_changed = snapshot.state != self.snapshot.state;
        log::trace!("{} cells changed", changes.len());
        self.snapshot = snapshot;
        state_changed || !changes.is_empty()
    }

    fn apply(&mut self, msg: CellMsg) -> bool {
        let updated = match msg {
            CellMsg::Dig(coords) => {
                log::debug!("dig cell: {:?}", coords);
                self.session.dig(coords).has_update()
            }
            CellMsg::Flag(coords) => {
                log::debug!("flag cell: {:?}", coords);
                self.session.flag(coords).has_update()
            }
        };
        if updated {
            log::debug!("status: {}", self.session.status().message());
        }
        updated
    }

    fn start(&mut self, difficulty: game::Difficulty) {
        self.session.new_game(difficulty);
        // the previous board may have another size, nothing to diff against
        self.snapshot = self.session.engine().snapshot();
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let GameProps { seed, difficulty } = ctx.props();
        let seed = seed
            .as_deref()
            .map(seed_from_str)
            .unwrap_or_else(js_random_seed);
        let difficulty = difficulty.unwrap_or_default();
        log::debug!("seed: {}, difficulty: {}", seed, difficulty);
        Self::new(game::Session::new(difficulty, seed))
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            CellEvent(cell_msg) => self.apply(cell_msg) && self.refresh(),
            NewGame => {
                self.start(self.session.difficulty());
                true
            }
            SelectDifficulty(difficulty) => {
                self.start(difficulty);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let (rows, cols) = self.snapshot.size();
        let selected = self.session.difficulty();
        let status = self.session.status().message();

        let cb_select = ctx.link().batch_callback(|e: Event| {
            let select = e.target_dyn_into::<HtmlSelectElement>()?;
            match select.value().parse::<game::Difficulty>() {
                Ok(difficulty) => Some(Msg::SelectDifficulty(difficulty)),
                Err(err) => {
                    log::error!("bad difficulty {:?}: {}", select.value(), err);
                    None
                }
            }
        });
        let cb_new_game = ctx.link().callback(|_: MouseEvent| Msg::NewGame);
        let callback = ctx.link().callback(Msg::CellEvent);

        let options = game::Difficulty::ALL
            .into_iter()
            .map(|difficulty| {
                html! {
                    <option value={difficulty.name()} selected={difficulty == selected}>
                        {difficulty.name()}
                    </option>
                }
            })
            .collect::<Html>();

        let board = (0..rows)
            .map(|row| {
                let cells = (0..cols)
                    .map(|col| {
                        let view = self.snapshot.view_at((row, col));
                        let callback = callback.clone();
                        html! {
                            <CellView {row} {col} {view} {callback}/>
                        }
                    })
                    .collect::<Html>();
                html! { <tr>{cells}</tr> }
            })
            .collect::<Html>();

        html! {
            <div class="sweeper">
                <nav>
                    <select id="difficulty" onchange={cb_select}>{options}</select>
                    <button onclick={cb_new_game}>{"New game"}</button>
                </nav>
                <table id="board">{board}</table>
                <p id="status">{status}</p>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_follow_cell_view() {
        use game::CellView::*;

        assert_eq!(cell_classes(Hidden), classes!("unrevealed"));
        assert_eq!(cell_classes(Revealed(0)), classes!("revealed"));
        assert_eq!(cell_classes(Revealed(3)), classes!("revealed", "a3"));
        assert_eq!(cell_classes(Flagged), classes!("flagged"));
        assert_eq!(cell_classes(Mine), classes!("mine"));
    }

    #[test]
    fn only_numbered_cells_have_text() {
        use game::CellView::*;

        assert_eq!(cell_text(Revealed(8)).as_deref(), Some("8"));
        assert_eq!(cell_text(Revealed(0)), None);
        assert_eq!(cell_text(Flagged), None);
        assert_eq!(cell_text(Hidden), None);
    }

    #[test]
    fn rejected_moves_do_not_update() {
        let outcome: game::Result<game::RevealOutcome> = Err(game::GameError::InvalidCoords);
        assert!(!outcome.has_update());
        assert!(Ok::<_, game::GameError>(game::MarkOutcome::Changed).has_update());
    }

    #[test]
    fn flag_refreshes_and_second_flag_restores() {
        let mut view = GameView::new(game::Session::new(game::Difficulty::Easy, 0));
        let before = view.snapshot.clone();

        assert!(view.apply(CellMsg::Flag((7, 7))));
        assert!(view.refresh());
        assert_eq!(view.snapshot.view_at((7, 7)), game::CellView::Flagged);

        assert!(view.apply(CellMsg::Flag((7, 7))));
        assert!(view.refresh());
        assert_eq!(view.snapshot, before);
    }

    #[test]
    fn difficulty_change_resizes_the_board() {
        let mut view = GameView::new(game::Session::new(game::Difficulty::Easy, 1));

        view.start(game::Difficulty::Hard);

        assert_eq!(view.snapshot.size(), (16, 30));
        assert_eq!(view.session.difficulty(), game::Difficulty::Hard);
        assert_eq!(view.session.status().message(), "Play!");
    }
}
