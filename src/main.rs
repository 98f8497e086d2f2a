mod config;
mod dispatch;
mod logging;
mod panes;
mod source;
mod state;
mod ui;

use std::time::Duration;

use config::Config;
use panes::{HelpPane, ParamEditorPane};
use source::ModelSource;
use state::AppState;
use ui::{Frame, InputEvent, InputSource, KeyCode, PaneManager, RatatuiBackend};

fn main() -> std::io::Result<()> {
    let source = match ModelSource::from_args(std::env::args().skip(1)) {
        Ok(source) => source,
        Err(usage) => {
            eprintln!("{}", usage);
            std::process::exit(2);
        }
    };

    let config = Config::load();
    let log_status = logging::init(&config);

    let mut state = match AppState::load(source) {
        Ok(state) => state,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("paramedit: {}", e);
            std::process::exit(1);
        }
    };

    let mut app_frame = Frame::new();
    app_frame.set_source_label(state.source.label());
    match log_status {
        Ok(path) => log::info!("logging to {}", path),
        Err(e) => app_frame.push_message(format!("Logging disabled: {}", e)),
    }

    let mut backend = RatatuiBackend::new()?;
    backend.start()?;

    let result = run(&mut backend, &config, &mut state, &mut app_frame);

    backend.stop()?;

    if config.print_on_exit() {
        if let Some(model) = &state.last_emitted {
            match model.to_json(config.pretty_output()) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("paramedit: {}", e),
            }
        }
    }
    result
}

fn run(
    backend: &mut RatatuiBackend,
    config: &Config,
    state: &mut AppState,
    app_frame: &mut Frame,
) -> std::io::Result<()> {
    let texts = config.editor_texts();
    let editor_title = texts.title.clone();
    let mut panes = PaneManager::new(Box::new(ParamEditorPane::new(texts)));
    panes.add_pane(Box::new(HelpPane::new()));

    loop {
        if let Some(event) = backend.poll_event(Duration::from_millis(16)) {
            // Global Ctrl-Q to quit
            if event == InputEvent::ctrl('q') {
                break;
            }

            // Global F1 opens help for the editor
            if event.key == KeyCode::F(1) && panes.active().id() != "help" {
                let keymap = panes.active().keymap().clone();
                if let Some(help) = panes.get_pane_mut::<HelpPane>("help") {
                    help.set_context(&editor_title, &keymap);
                }
                panes.push_to("help", state);
                continue;
            }

            let action = panes.handle_input(event, state);
            if dispatch::dispatch_action(&action, state, &mut panes, app_frame) {
                break;
            }
        }

        backend.draw(|area, buf| {
            app_frame.render_buf(area, buf);
            panes.render(Frame::content_area(area), buf, state);
        })?;
    }

    log::info!("exiting");
    Ok(())
}
