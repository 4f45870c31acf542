//! Main application for the Gomoku GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use super::board_view::BoardView;
use super::session::GameSession;
use super::theme::*;
use crate::board::Stone;
use crate::config::GameConfig;

/// Main Gomoku application
pub struct GomokuApp {
    session: GameSession,
    board_view: BoardView,
    config: GameConfig,
    show_debug: bool,
}

impl GomokuApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, session: GameSession, config: GameConfig) -> Self {
        Self {
            session,
            board_view: BoardView::default(),
            config,
            show_debug: true,
        }
    }

    fn is_human_turn(&self) -> bool {
        let status = &self.session.snapshot().status;
        !status.finished && status.next == Stone::Black && !self.session.is_ai_thinking()
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (N)").clicked() {
                        self.session.restart();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "AI Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!(
                        "{0}x{0} - You: Black - AI depth {1}",
                        self.config.board_size, self.config.search_depth
                    ));
                });
            });
        });
    }

    /// Render the side panel with game info
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(egui::Color32::from_rgb(25, 27, 31)))
            .show(ctx, |ui| {
                ui.add_space(12.0);

                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                if self.show_debug {
                    self.render_ai_card(ui);
                    ui.add_space(10.0);
                }

                if self.session.snapshot().status.finished {
                    self.render_game_over_card(ui);
                    ui.add_space(10.0);
                }

                if let Some(msg) = self.session.snapshot().message.clone() {
                    self.render_message_card(ui, &msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(egui::Color32::from_rgb(35, 38, 43))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("●○").size(20.0).color(egui::Color32::from_rgb(180, 180, 185)));
            ui.add_space(4.0);
            ui.label(RichText::new("GOMOKU").size(22.0).strong().color(TEXT_PRIMARY));
        });
    }

    /// Render turn indicator card
    fn render_turn_card(&self, ui: &mut egui::Ui) {
        let status = &self.session.snapshot().status;
        let moves = status.board.iter().flatten().filter(|&&s| s != Stone::Empty).count();

        Self::card_frame().show(ui, |ui| {
            let is_black = status.next == Stone::Black;
            let (stone_char, color_name, accent) = if is_black {
                ("●", "BLACK", egui::Color32::from_rgb(70, 70, 75))
            } else {
                ("○", "WHITE", egui::Color32::from_rgb(220, 220, 225))
            };

            ui.horizontal(|ui| {
                let stone_color = if is_black {
                    TEXT_PRIMARY
                } else {
                    egui::Color32::from_rgb(30, 30, 35)
                };

                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, accent);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    stone_char,
                    egui::FontId::proportional(28.0),
                    stone_color,
                );

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(color_name).size(18.0).strong().color(TEXT_PRIMARY));

                    let line = if let Some(elapsed) = self.session.ai_thinking_elapsed() {
                        let secs = elapsed.as_secs_f32();
                        let limit = self.config.ai_time_limit_ms as f32 / 1000.0;
                        let color = if secs < limit * 0.5 {
                            TIMER_NORMAL
                        } else if secs < limit {
                            TIMER_WARNING
                        } else {
                            TIMER_CRITICAL
                        };
                        (format!("AI thinking... {secs:.1}s"), color)
                    } else if status.finished {
                        ("Game Over".to_string(), WIN_HIGHLIGHT)
                    } else {
                        ("Your turn".to_string(), TIMER_NORMAL)
                    };
                    ui.label(RichText::new(line.0).size(12.0).color(line.1));
                });
            });

            ui.add_space(8.0);
            ui.label(RichText::new(format!("Move #{moves}")).size(11.0).color(TEXT_SECONDARY));
        });
    }

    /// Last AI move, 1-based like the board labels
    fn render_ai_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("AI").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            match &self.session.snapshot().last_ai {
                Some(ai) => {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!("→ ({}, {})", ai.pos.row + 1, ai.pos.col + 1))
                                .size(12.0)
                                .strong()
                                .color(WIN_HIGHLIGHT),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                            ui.label(
                                RichText::new(format!("{}ms", ai.elapsed.as_millis()))
                                    .size(10.0)
                                    .color(TEXT_SECONDARY),
                            );
                        });
                    });
                    ui.label(RichText::new(format!("Score: {}", ai.score)).size(10.0).color(TEXT_SECONDARY));
                }
                None => {
                    ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                }
            }
        });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui) {
        let winner = self.session.snapshot().status.winner;
        let (headline, symbol, accent) = match winner {
            Stone::Black => ("BLACK WINS!", "●", egui::Color32::from_rgb(70, 70, 75)),
            Stone::White => ("WHITE WINS!", "○", egui::Color32::from_rgb(220, 220, 225)),
            Stone::Empty => ("DRAW", "·", TEXT_SECONDARY),
        };
        let detail = if winner == Stone::Empty {
            "board is full"
        } else {
            "by 5-in-a-row"
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);

                    ui.horizontal(|ui| {
                        ui.add_space(ui.available_width() / 2.0 - 60.0);
                        ui.label(RichText::new(symbol).size(32.0).color(accent));
                        ui.add_space(8.0);
                        ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                    });

                    ui.add_space(4.0);
                    ui.label(RichText::new(detail).size(11.0).color(TEXT_SECONDARY));
                    ui.add_space(12.0);

                    Frame::new()
                        .fill(egui::Color32::from_rgb(60, 100, 70))
                        .corner_radius(CornerRadius::same(6))
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            let button = egui::Label::new(
                                RichText::new("New Game").size(14.0).strong().color(TEXT_PRIMARY),
                            )
                            .sense(egui::Sense::click());
                            if ui.add(button).clicked() {
                                self.session.restart();
                            }
                        });
                });
            });
    }

    fn render_message_card(&self, ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("⚠").size(14.0));
                    ui.add_space(4.0);
                    ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
                });
            });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        let interactive = self.is_human_turn();

        CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

            let status = &self.session.snapshot().status;
            let clicked = self.board_view.show(
                ui,
                &status.board,
                status.next,
                status.last_move,
                status.win_cells.as_deref(),
                interactive,
            );

            if let Some(pos) = clicked {
                self.session.play(pos);
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        let (toggle_debug, new_game) =
            ctx.input(|i| (i.key_pressed(egui::Key::D), i.key_pressed(egui::Key::N)));

        if toggle_debug {
            self.show_debug = !self.show_debug;
        }
        if new_game {
            self.session.restart();
        }
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.session.poll();

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        // Keep polling the worker while the AI is searching
        if self.session.is_ai_thinking() {
            ctx.request_repaint();
        }
    }
}
