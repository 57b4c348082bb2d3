use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use rand::Rng;

use crate::game::{CellCode, SnakeEngine};
use crate::metrics::GameMetrics;

const FOOD_COLOR: Color = Color::Rgb(80, 80, 255);
const BODY_COLOR: Color = Color::Rgb(0, 128, 0);
const HEAD_COLOR: Color = Color::Rgb(255, 255, 0);

/// Each board cell is two terminal columns wide so cells look square
const CELL_COLUMNS: u16 = 2;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<R: Rng, const W: usize, const H: usize>(
        &self,
        frame: &mut Frame,
        engine: &SnakeEngine<R, W, H>,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(engine, metrics);
        frame.render_widget(stats, chunks[0]);

        // Board plus its border, centered in the game area
        let board_area = centered(
            chunks[1],
            W as u16 * CELL_COLUMNS + 2,
            H as u16 + 2,
        );
        frame.render_widget(self.render_grid(engine), board_area);

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid<R: Rng, const W: usize, const H: usize>(
        &self,
        engine: &SnakeEngine<R, W, H>,
    ) -> Paragraph<'static> {
        Paragraph::new(board_lines(engine)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats<R: Rng, const W: usize, const H: usize>(
        &self,
        engine: &SnakeEngine<R, W, H>,
        metrics: &GameMetrics,
    ) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                engine.body_len().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.longest_snake.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Round: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.round.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// One line of spans per board row, the head drawn over its body cell
fn board_lines<R: Rng, const W: usize, const H: usize>(
    engine: &SnakeEngine<R, W, H>,
) -> Vec<Line<'static>> {
    let head = engine.head_position();

    (0..H)
        .map(|y| {
            let spans: Vec<Span<'static>> = (0..W)
                .map(|x| {
                    if x == head.x && y == head.y {
                        return Span::styled("██", Style::default().fg(HEAD_COLOR));
                    }
                    match engine.cell_at(x, y) {
                        CellCode::Empty => {
                            Span::styled(" ·", Style::default().fg(Color::DarkGray))
                        }
                        CellCode::Food => Span::styled("██", Style::default().fg(FOOD_COLOR)),
                        _ => Span::styled("██", Style::default().fg(BODY_COLOR)),
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
