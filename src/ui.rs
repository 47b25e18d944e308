use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(80, 255, 80)))
        .title(" Glyph Invaders ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(100, 255, 100))
                .add_modifier(Modifier::BOLD),
        );

    let inner = block.inner(frame.area());
    frame.render_widget(block, frame.area());

    let field = Paragraph::new(app.screen.text())
        .style(Style::default().fg(Color::Rgb(200, 255, 200)).bg(Color::Rgb(0, 0, 5)));
    frame.render_widget(field, inner);
}
