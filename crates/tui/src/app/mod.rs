use std::{sync::Arc, time::Duration};

use crossterm::event::{self, Event, KeyEvent};
use deck_engine::{
    CarouselScroll, Collaborators, LayoutEnv, ListRenderModel, Platform, ScanGesture, Transition,
    Wallet, WalletsListScreen,
    collab::{HapticFeedback, Route, TracingAnalytics, WalletStore},
    scan::ActionSheet,
};
use tokio::sync::{mpsc, oneshot, watch};

use crate::{
    clipboard::SystemClipboard,
    config::AppConfig,
    error::{AppError, Result},
    prompt::{PromptScanner, PromptSheets, UiHandle, UiNavigator, UiRequest},
    routes::PayloadRouter,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

/// Width of one carousel page in the offsets handed to the screen.
const PAGE_WIDTH: f64 = 100.0;
const TOAST_TICKS: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    ticks_left: u8,
}

#[derive(Debug)]
pub struct PromptState {
    pub title: String,
    pub hint: String,
    pub input: String,
    reply: Option<oneshot::Sender<Option<String>>>,
}

#[derive(Debug)]
pub struct SheetState {
    pub sheet: ActionSheet,
    pub selected: usize,
    reply: Option<oneshot::Sender<Option<usize>>>,
}

impl SheetState {
    fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(self.sheet.options.len().saturating_sub(1));
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[derive(Debug)]
pub enum Overlay {
    Prompt(PromptState),
    Sheet(SheetState),
}

#[derive(Debug)]
pub struct AppState {
    pub model: ListRenderModel,
    pub wallets: Vec<Arc<Wallet>>,
    pub focus_index: usize,
    pub platform: Platform,
    pub source: String,
    /// Where the last navigation went; the list is blurred while it is open.
    pub detail: Option<Route>,
    pub overlay: Option<Overlay>,
    pub toast: Option<ToastState>,
}

impl AppState {
    fn toast(&mut self, message: impl Into<String>, level: ToastLevel) {
        self.toast = Some(ToastState {
            message: message.into(),
            level,
            ticks_left: TOAST_TICKS,
        });
    }
}

pub struct App {
    screen: WalletsListScreen,
    store: Arc<dyn WalletStore>,
    requests: mpsc::UnboundedReceiver<UiRequest>,
    loading: watch::Receiver<bool>,
    was_loading: bool,
    tablet: bool,
    screen_width: Option<u16>,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig, store: Arc<dyn WalletStore>, source: String) -> Self {
        let (ui_handle, requests) = UiHandle::channel();
        let navigator = Arc::new(UiNavigator::new(ui_handle.clone()));
        let collab = Collaborators {
            store: store.clone(),
            scanner: Arc::new(PromptScanner::new(ui_handle.clone())),
            clipboard: Arc::new(SystemClipboard),
            sheets: Arc::new(PromptSheets::new(ui_handle)),
            analytics: Arc::new(TracingAnalytics),
            navigator: navigator.clone(),
            haptics: navigator,
            resolver: Arc::new(PayloadRouter),
        };
        let screen = WalletsListScreen::new(collab, config.platform, config.staleness_policy());
        let loading = screen.subscribe_loading();
        let env = LayoutEnv {
            platform: config.platform,
            is_tablet: config.tablet,
            window_width: 0.0,
            screen_width: 0.0,
        };

        let state = AppState {
            model: screen.render_model(&env),
            wallets: store.wallets(),
            focus_index: 0,
            platform: config.platform,
            source,
            detail: None,
            overlay: None,
            toast: None,
        };

        Self {
            screen,
            store,
            requests,
            loading,
            was_loading: false,
            tablet: config.tablet,
            screen_width: None,
            state,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        self.screen.mount();
        self.screen.focus();
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            self.drain_requests();
            self.watch_loading();

            let size = terminal
                .size()
                .map_err(|err| AppError::Terminal(err.to_string()))?;
            self.refresh_state(size.width);
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;
            self.follow_collection();

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            } else {
                self.tick_toast();
            }
        }

        Ok(())
    }

    fn layout_env(&mut self, width: u16) -> LayoutEnv {
        let screen_width = *self.screen_width.get_or_insert(width);
        LayoutEnv {
            platform: self.state.platform,
            is_tablet: self.tablet,
            window_width: f64::from(width),
            screen_width: f64::from(screen_width),
        }
    }

    fn refresh_state(&mut self, width: u16) {
        let env = self.layout_env(width);
        self.state.model = self.screen.render_model(&env);
        self.state.wallets = self.store.wallets();
        self.state.focus_index = self.screen.focus_index();
    }

    /// Scrolls the carousel after the collection grew or shrank.
    fn follow_collection(&mut self) {
        match self.screen.wallets_changed() {
            Some(CarouselScroll::ToWallet(index)) => self.scroll_to(index),
            Some(CarouselScroll::ResetSelection) => self.scroll_to(0),
            None => {}
        }
    }

    fn watch_loading(&mut self) {
        if !self.loading.has_changed().unwrap_or(false) {
            return;
        }
        let loading = *self.loading.borrow_and_update();
        if self.was_loading && !loading {
            self.state.toast("Wallets up to date", ToastLevel::Success);
        }
        self.was_loading = loading;
    }

    fn tick_toast(&mut self) {
        if let Some(toast) = self.state.toast.as_mut() {
            toast.ticks_left = toast.ticks_left.saturating_sub(1);
            if toast.ticks_left == 0 {
                self.state.toast = None;
            }
        }
    }

    fn drain_requests(&mut self) {
        while let Ok(request) = self.requests.try_recv() {
            match request {
                UiRequest::Prompt { title, hint, reply } => {
                    self.state.overlay = Some(Overlay::Prompt(PromptState {
                        title,
                        hint,
                        input: String::new(),
                        reply: Some(reply),
                    }));
                }
                UiRequest::Sheet { sheet, reply } => {
                    self.state.overlay = Some(Overlay::Sheet(SheetState {
                        selected: sheet.cancel_index,
                        sheet,
                        reply: Some(reply),
                    }));
                }
                UiRequest::Navigate(route) => self.navigate(route),
                UiRequest::Haptic(HapticFeedback::NotificationError) => {
                    self.state.toast("Nothing to reorder", ToastLevel::Error);
                }
                UiRequest::Haptic(HapticFeedback::ImpactLight) => {
                    tracing::debug!("impact feedback");
                }
            }
        }
    }

    fn navigate(&mut self, route: Route) {
        tracing::info!(?route, "navigating");
        self.screen.blur();
        self.state.detail = Some(route);
    }

    fn close_detail(&mut self) {
        if self.state.detail.take().is_some() {
            self.screen.focus();
        }
    }

    fn scroll_to(&mut self, index: usize) {
        let settled = self.screen.scroll_settled(index as f64 * PAGE_WIDTH, PAGE_WIDTH);
        if let Transition::Moved { refresh: true, .. } = settled.transition {
            self.state.toast("Updating wallet", ToastLevel::Info);
        }
        self.state.focus_index = self.screen.focus_index();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let typing = matches!(self.state.overlay, Some(Overlay::Prompt(_)));
        let action = map_key(key, typing);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.state.overlay.take() {
            Some(Overlay::Prompt(prompt)) => self.handle_prompt_key(prompt, action),
            Some(Overlay::Sheet(sheet)) => self.handle_sheet_key(sheet, action),
            None if self.state.detail.is_some() => {
                if matches!(action, AppAction::Cancel | AppAction::Input('b')) {
                    self.close_detail();
                }
            }
            None => self.handle_list_key(action),
        }
    }

    fn handle_prompt_key(&mut self, mut prompt: PromptState, action: AppAction) {
        match action {
            AppAction::Submit => {
                if let Some(reply) = prompt.reply.take() {
                    let _ = reply.send(Some(prompt.input));
                }
            }
            AppAction::Cancel => {
                if let Some(reply) = prompt.reply.take() {
                    let _ = reply.send(None);
                }
            }
            AppAction::Backspace => {
                prompt.input.pop();
                self.state.overlay = Some(Overlay::Prompt(prompt));
            }
            AppAction::Input(ch) => {
                prompt.input.push(ch);
                self.state.overlay = Some(Overlay::Prompt(prompt));
            }
            _ => self.state.overlay = Some(Overlay::Prompt(prompt)),
        }
    }

    fn handle_sheet_key(&mut self, mut sheet: SheetState, action: AppAction) {
        match action {
            AppAction::Submit => {
                if let Some(reply) = sheet.reply.take() {
                    let _ = reply.send(Some(sheet.selected));
                }
            }
            AppAction::Cancel => {
                if let Some(reply) = sheet.reply.take() {
                    let _ = reply.send(None);
                }
            }
            AppAction::Up | AppAction::Prev => {
                sheet.select_prev();
                self.state.overlay = Some(Overlay::Sheet(sheet));
            }
            AppAction::Down | AppAction::Next => {
                sheet.select_next();
                self.state.overlay = Some(Overlay::Sheet(sheet));
            }
            _ => self.state.overlay = Some(Overlay::Sheet(sheet)),
        }
    }

    fn handle_list_key(&mut self, action: AppAction) {
        let last = self.state.wallets.len();
        match action {
            AppAction::Prev | AppAction::Up => {
                self.scroll_to(self.state.focus_index.saturating_sub(1));
            }
            AppAction::Next | AppAction::Down => {
                self.scroll_to((self.state.focus_index + 1).min(last));
            }
            AppAction::Submit => self.screen.wallet_clicked(self.state.focus_index),
            AppAction::Input(ch) => self.handle_list_char(ch),
            _ => {}
        }
    }

    fn handle_list_char(&mut self, ch: char) {
        match ch {
            'h' => self.scroll_to(self.state.focus_index.saturating_sub(1)),
            'l' => self.scroll_to((self.state.focus_index + 1).min(self.state.wallets.len())),
            'r' => self.refresh(),
            's' => self.scan(ScanGesture::Tap),
            'S' => self.scan(ScanGesture::LongPress),
            'm' => self.screen.wallet_long_pressed(),
            'a' => self.screen.add_wallet_pressed(),
            'o' => self.screen.settings_pressed(),
            _ => {}
        }
    }

    fn refresh(&mut self) {
        let started = if self.state.model.transactions_header.refresh.is_some() {
            self.screen.refresh_pressed()
        } else if self.state.model.pull_to_refresh {
            self.screen.pull_to_refresh()
        } else {
            None
        };
        if started.is_none() {
            tracing::debug!("refresh not started");
        }
    }

    fn scan(&mut self, gesture: ScanGesture) {
        let Some(button) = self.state.model.scan_button else {
            return;
        };
        let gesture = if button.long_press {
            gesture
        } else {
            ScanGesture::Tap
        };
        // The flow reports back through the request queue.
        drop(self.screen.scan(gesture));
    }
}
