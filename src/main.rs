use std::error::Error;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use talkie::config::Config;
use talkie::storage::{MemoStore, RemoteWatcher, Subscription};
use talkie::ui::{self, App, render, store_action};

/// 事件轮询间隔，同时决定存储事件的最大延迟
const TICK: Duration = Duration::from_millis(250);

/// 获取数据目录路径 (~/.local/share/talkie/)
fn get_data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户数据目录"))?
        .join("talkie");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// 终端被 TUI 占用，日志写入数据目录下的 talkie.log
fn init_logging(config: &Config, data_dir: &Path) -> io::Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("talkie.log"))?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .target(env_logger::Target::Pipe(Box::new(log_file)))
    .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let data_dir = get_data_dir()?;
    let config = Config::load(&Config::default_path())?;
    init_logging(&config, &data_dir)?;

    // 数据文件路径 (~/.local/share/talkie/memos.toml)
    let data_path = config.resolve_data_file(&data_dir);
    let store = MemoStore::open(&data_path)?;
    let subscription = store.subscribe();
    let mut watcher = RemoteWatcher::spawn(
        store.clone(),
        Duration::from_millis(config.remote_poll_interval_ms),
    );

    // 创建应用状态
    let mut app = App::new(config, data_path, store.memos(), Local::now());

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app, &subscription);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    watcher.stop();
    store.unsubscribe(subscription.id);
    log::info!("Exiting");

    Ok(result?)
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    subscription: &Subscription,
) -> io::Result<()> {
    loop {
        // 后台线程的存储事件在这里回到 UI 线程
        for store_event in subscription.events.try_iter() {
            app.dispatch(store_action(store_event, Local::now()));
        }

        terminal.draw(|f| render(f, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && ui::handle_key_event(app, key.code) {
                    break;
                }
            }
        }
    }
    Ok(())
}
