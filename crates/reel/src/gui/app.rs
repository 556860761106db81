use crate::config::{self, ThemeConfig};
use crate::events::AppEvent;
use crate::gui::deck::{self, Deck, DeckAction, Track};
use crate::gui::now_ms;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use gtk::prelude::*;
use gtk4 as gtk;
use reel_core::protocol::ControlCommand;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// GTK reports one wheel notch as a delta of 1.0.
const WHEEL_NOTCH_PX: f64 = 100.0;

pub struct AppModel {
    pub deck: Rc<RefCell<Deck>>,
    pub theme: Rc<RefCell<ThemeConfig>>,
    pub visible: bool,
    pub drag_origin: f64,
    pub frame_timer: Option<glib::SourceId>,
    pub vertical_area: gtk::DrawingArea,
    pub horizontal_area: gtk::DrawingArea,
    pub panel_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Command(ControlCommand),
    ConfigReload,
    Tick,
    Resize(Track, f64),
    Wheel(f64),
    SwipeBegin(f64),
    SwipeMove(f64),
    SwipeEnd,
    PanelClick(f64, f64),
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Command(c) => AppMsg::Command(c),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn redraw(&self, action: DeckAction) {
        if action.redraw_vertical {
            self.vertical_area.queue_draw();
        }
        if action.redraw_horizontal {
            self.horizontal_area.queue_draw();
        }
        if action.redraw_panel {
            self.panel_area.queue_draw();
        }
    }

    fn install_draw_funcs(&self) {
        let (deck, theme) = (self.deck.clone(), self.theme.clone());
        self.vertical_area.set_draw_func(move |area, cr, _, h| {
            let colors = ThemeColors::from_context(&area.style_context(), &theme.borrow());
            let deck = deck.borrow();
            let carousel = deck.carousel(Track::Vertical);
            if let Err(e) = deck::draw_vertical(cr, carousel, now_ms(), &colors, h as f64) {
                log::error!("Drawing error: {}", e);
            }
        });

        let (deck, theme) = (self.deck.clone(), self.theme.clone());
        self.horizontal_area.set_draw_func(move |area, cr, w, h| {
            let colors = ThemeColors::from_context(&area.style_context(), &theme.borrow());
            let deck = deck.borrow();
            let carousel = deck.carousel(Track::Horizontal);
            if let Err(e) =
                deck::draw_horizontal(cr, carousel, now_ms(), &colors, w as f64, h as f64)
            {
                log::error!("Drawing error: {}", e);
            }
        });

        let (deck, theme) = (self.deck.clone(), self.theme.clone());
        self.panel_area.set_draw_func(move |area, cr, w, h| {
            let colors = ThemeColors::from_context(&area.style_context(), &theme.borrow());
            let deck = deck.borrow();
            if let Err(e) =
                deck::draw_panel(cr, deck.panel(), now_ms(), &colors, w as f64, h as f64)
            {
                log::error!("Drawing error: {}", e);
            }
        });
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Deck, ThemeConfig, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Reel"),
            #[watch]
            set_visible: model.visible,
            add_css_class: "reel-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    use gtk::gdk::Key;
                    let msg = if key == Key::Escape {
                        AppMsg::Hide
                    } else if key == Key::Down || key == Key::Right {
                        AppMsg::Command(ControlCommand::Next)
                    } else if key == Key::Up || key == Key::Left {
                        AppMsg::Command(ControlCommand::Prev)
                    } else {
                        return glib::Propagation::Proceed;
                    };
                    sender.input(msg);
                    glib::Propagation::Stop
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,
                set_spacing: 24,
                set_margin_all: 24,

                #[name = "vertical_area"]
                gtk::DrawingArea {
                    set_content_width: 440,
                    set_vexpand: true,
                    add_css_class: "reel-carousel",

                    connect_resize[sender] => move |_, w, _| {
                        sender.input(AppMsg::Resize(Track::Vertical, w as f64));
                    },

                    add_controller = gtk::EventControllerScroll::new(
                        gtk::EventControllerScrollFlags::VERTICAL
                    ) {
                        connect_scroll[sender] => move |_, _, dy| {
                            sender.input(AppMsg::Wheel(dy * WHEEL_NOTCH_PX));
                            glib::Propagation::Stop
                        }
                    }
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 24,
                    set_hexpand: true,

                    #[name = "panel_area"]
                    gtk::DrawingArea {
                        set_vexpand: true,
                        set_content_height: 380,
                        add_css_class: "reel-panel",

                        add_controller = gtk::GestureClick {
                            connect_released[sender] => move |_, _, x, y| {
                                sender.input(AppMsg::PanelClick(x, y));
                            }
                        }
                    },

                    #[name = "horizontal_area"]
                    gtk::DrawingArea {
                        set_hexpand: true,
                        set_content_height: 320,
                        add_css_class: "reel-carousel",

                        // turned on its side: the cross axis is the area's height
                        connect_resize[sender] => move |_, _, h| {
                            sender.input(AppMsg::Resize(Track::Horizontal, h as f64));
                        },

                        add_controller = gtk::GestureDrag {
                            connect_drag_begin[sender] => move |_, x, _| {
                                sender.input(AppMsg::SwipeBegin(x));
                            },
                            connect_drag_update[sender] => move |_, dx, _| {
                                sender.input(AppMsg::SwipeMove(dx));
                            },
                            connect_drag_end[sender] => move |_, _, _| {
                                sender.input(AppMsg::SwipeEnd);
                            }
                        }
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (deck, theme, rx) = init;

        theme::load_css();
        window::init_window(&root);

        let model = AppModel {
            deck: Rc::new(RefCell::new(deck)),
            theme: Rc::new(RefCell::new(theme)),
            visible: true,
            drag_origin: 0.0,
            frame_timer: None,
            vertical_area: gtk::DrawingArea::default(),
            horizontal_area: gtk::DrawingArea::default(),
            panel_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.vertical_area = widgets.vertical_area.clone();
        model.horizontal_area = widgets.horizontal_area.clone();
        model.panel_area = widgets.panel_area.clone();
        model.install_draw_funcs();

        let tick_sender = sender.clone();
        model.frame_timer = Some(glib::timeout_add_local(FRAME_INTERVAL, move || {
            tick_sender.input(AppMsg::Tick);
            glib::ControlFlow::Continue
        }));

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let now = now_ms();
        match msg {
            AppMsg::Show => {
                self.visible = true;
                self.deck.borrow_mut().resume(now);
                self.redraw(DeckAction::all());
            }
            AppMsg::Hide => {
                self.visible = false;
                self.deck.borrow_mut().pause();
            }
            AppMsg::Command(command) => {
                log::debug!("control command: {}", command);
                let action = self.deck.borrow_mut().handle_command(&command, now);
                self.redraw(action);
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    if let Err(e) = self.deck.borrow_mut().reload(&new_config, now) {
                        log::error!("Failed to apply config: {}", e);
                        return;
                    }
                    *self.theme.borrow_mut() = new_config.theme;
                    self.redraw(DeckAction::all());
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Tick => {
                if !self.visible {
                    return;
                }
                let action = self.deck.borrow_mut().tick(now);
                self.redraw(action);
            }
            AppMsg::Resize(track, width) => {
                log::debug!("{} carousel resized to {}", track, width);
                let action = self.deck.borrow_mut().resize(track, width, now);
                self.redraw(action);
            }
            AppMsg::Wheel(delta_y) => {
                let action = self.deck.borrow_mut().on_wheel(delta_y, now);
                self.redraw(action);
            }
            AppMsg::SwipeBegin(x) => {
                self.drag_origin = x;
                self.deck.borrow_mut().on_swipe_begin(x, now);
            }
            AppMsg::SwipeMove(offset_x) => {
                let action = self
                    .deck
                    .borrow_mut()
                    .on_swipe_move(self.drag_origin + offset_x, now);
                self.redraw(action);
            }
            AppMsg::SwipeEnd => self.deck.borrow_mut().on_swipe_end(),
            AppMsg::PanelClick(x, y) => {
                let (w, h) = (
                    self.panel_area.width() as f64,
                    self.panel_area.height() as f64,
                );
                let count = self.deck.borrow().items().len();
                if let Some(index) = deck::bar_at(x, y, w, h, count) {
                    let action = self.deck.borrow_mut().navigate(index, now);
                    self.redraw(action);
                }
            }
        }
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        if let Some(timer) = self.frame_timer.take() {
            timer.remove();
        }
        self.deck.borrow_mut().destroy();
        log::debug!("carousels destroyed");
    }
}
