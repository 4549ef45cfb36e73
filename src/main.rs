use coindrop::ads::{AdEvent, RewardedAdProvider};
use coindrop::constants::GAME_OVER_REWARD;
use coindrop::game_session::GameSession;
use coindrop::notices::NoticeLog;
use coindrop::save_manager::SaveManager;
use coindrop::simulated_ads::SimulatedAdNetwork;
use coindrop::ui;
use crossterm::event::{self, DisableFocusChange, EnableFocusChange, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    let save_manager = SaveManager::new()?;
    let mut ads = SimulatedAdNetwork::new();
    let mut notices = NoticeLog::new();

    // Restore the previous session when a usable save exists; otherwise this
    // is a fresh launch and coins start from zero.
    let (mut session, restored) = match save_manager.load() {
        Ok(record) => (GameSession::from_record(record), true),
        Err(_) => (GameSession::new(), false),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    if restored {
        notices.push("Session restored.");
        // The save was taken while backgrounded; foregrounding decides
        // whether the countdown restarts (mid-round) or retry is offered
        // (game over).
        session.resume(&mut ads);
    } else {
        notices.push("New game. Survive the countdown!");
        session.start_new_round(&mut ads);
    }

    let mut last_advance = Instant::now();
    loop {
        terminal.draw(|frame| ui::draw(frame, &session, &notices))?;

        // Poll for input (50ms non-blocking)
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key_event) => match key_event.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        session.pause(&mut ads);
                        save_manager.save(&session.to_record())?;
                        break;
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') => {
                        if session.retry_available() {
                            session.start_new_round(&mut ads);
                            notices.push("New round started.");
                        }
                    }
                    KeyCode::Char('w') | KeyCode::Char('W') => {
                        if session.watch_ad_available() {
                            session.show_rewarded_ad(&mut ads);
                        }
                    }
                    _ => {}
                },
                // Terminal focus stands in for the platform's
                // foreground/background lifecycle.
                Event::FocusLost => {
                    session.pause(&mut ads);
                    save_manager.save(&session.to_record())?;
                }
                Event::FocusGained => {
                    session.resume(&mut ads);
                }
                _ => {}
            }
        }

        // Drive the countdown by however much wall-clock time passed since
        // the last pass through the loop.
        let elapsed = last_advance.elapsed();
        last_advance = Instant::now();
        let was_over = session.is_over();
        session.advance(elapsed, &mut ads);
        if session.is_over() && !was_over {
            notices.push(format!("You lose! +{} coin.", GAME_OVER_REWARD));
        }

        for ad_event in ads.poll_events() {
            if let AdEvent::Rewarded { amount } = ad_event {
                session.on_ad_reward(amount);
            }
            notices.push(ad_event.to_string());
        }
    }

    session.dispose(&mut ads);

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableFocusChange)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    println!("Goodbye!");

    Ok(())
}
