//! Replays the permission flows against a scripted platform broker.
//!
//! Usage: `cargo run --bin walkthrough [script.json]`
//!
//! Without an argument the built-in scenarios run: the gated screen story
//! (soft denial, exhausted prompt, grant from settings) and the optional
//! grid story. A script file supplies platform seed state and prompt
//! answers for the grid journey instead.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use permflow::broker::{
    AnswerEntry, NullSettingsLauncher, PromptAnswer, Script, ScriptedBroker, SeedEntry,
};
use permflow::engine::{GateDecision, ScreenGate};
use permflow::error::FlowResult;
use permflow::events::{timestamp_rfc3339, FlowEvent, FlowLog};
use permflow::permission::{rationale_for, PermissionId, RequestUnit};
use permflow::screen::{GatedScreen, LifecyclePhase, PermissionGrid};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(error) = run() {
        eprintln!("walkthrough failed: {error}");
        std::process::exit(1);
    }
}

fn run() -> FlowResult<()> {
    match std::env::args().nth(1) {
        Some(path) => {
            let script = Script::from_path(Path::new(&path))?;
            grid_story(&script)
        }
        None => {
            gated_story()?;
            grid_story(&builtin_grid_script())
        }
    }
}

fn gated_story() -> FlowResult<()> {
    println!("== gated screen: camera + precise location ==");

    let mut broker = ScriptedBroker::new();
    broker.push_answer(PermissionId::Camera, PromptAnswer::Grant);
    broker.push_answer(PermissionId::FineLocation, PromptAnswer::Deny);
    broker.push_answer(PermissionId::FineLocation, PromptAnswer::Deny);

    let settings = NullSettingsLauncher;
    let mut screen = GatedScreen::new(ScreenGate::new(vec![
        RequestUnit::Single(PermissionId::Camera),
        RequestUnit::Single(PermissionId::FineLocation),
    ]));

    screen.handle_lifecycle(LifecyclePhase::Foreground, &mut broker);
    pump_gated(&mut screen, &mut broker);
    report_gate(&screen);

    // First denial was soft; the denial view's button re-requests.
    screen.confirm_denied(&mut broker, &settings)?;
    pump_gated(&mut screen, &mut broker);
    report_gate(&screen);

    // Second denial exhausted the prompt; the button now opens settings.
    screen.confirm_denied(&mut broker, &settings)?;

    // The user flips the grant by hand and comes back to the screen.
    broker.seed(PermissionId::FineLocation, true, 2);
    screen.handle_lifecycle(LifecyclePhase::Background, &mut broker);
    screen.handle_lifecycle(LifecyclePhase::Foreground, &mut broker);
    pump_gated(&mut screen, &mut broker);
    report_gate(&screen);

    print_transcript(screen.log());
    Ok(())
}

fn builtin_grid_script() -> Script {
    Script {
        seed: vec![SeedEntry {
            permission: PermissionId::BluetoothConnect,
            granted: false,
            denials: 2,
        }],
        answers: vec![
            AnswerEntry {
                permission: PermissionId::Camera,
                answer: PromptAnswer::Grant,
            },
            AnswerEntry {
                permission: PermissionId::BluetoothAdvertise,
                answer: PromptAnswer::Grant,
            },
            AnswerEntry {
                permission: PermissionId::BluetoothScan,
                answer: PromptAnswer::Grant,
            },
            AnswerEntry {
                permission: PermissionId::FineLocation,
                answer: PromptAnswer::Deny,
            },
            AnswerEntry {
                permission: PermissionId::FineLocation,
                answer: PromptAnswer::Grant,
            },
            AnswerEntry {
                permission: PermissionId::Notifications,
                answer: PromptAnswer::Grant,
            },
        ],
    }
}

fn grid_story(script: &Script) -> FlowResult<()> {
    println!("\n== optional grid: camera / bluetooth / location / notifications ==");

    let mut broker = ScriptedBroker::from_script(script);
    let settings = NullSettingsLauncher;
    let mut grid = PermissionGrid::with_default_tiles();

    for index in 0..grid.tiles().len() {
        let tile = grid.tiles()[index];
        println!("tap '{tile}'");
        grid.tap(index, &mut broker)?;
        pump_grid(&mut grid, &mut broker);
        report_dialog(&grid);

        if grid.dialog_target().is_some() {
            grid.confirm_dialog(&mut broker, &settings)?;
            pump_grid(&mut grid, &mut broker);
            report_dialog(&grid);
        }
    }

    print_transcript(grid.log());
    Ok(())
}

fn pump_gated(screen: &mut GatedScreen, broker: &mut ScriptedBroker) {
    while let Some(outcome) = broker.poll_delivery() {
        screen.handle_outcome(&outcome, &*broker);
    }
}

fn pump_grid(grid: &mut PermissionGrid, broker: &mut ScriptedBroker) {
    while let Some(outcome) = broker.poll_delivery() {
        grid.handle_outcome(&outcome, &*broker);
    }
}

fn report_gate(screen: &GatedScreen) {
    match screen.decision() {
        GateDecision::Granted => println!("-> content rendered"),
        GateDecision::Denied { offender, permanent } => {
            let content = rationale_for(offender);
            println!(
                "-> denial view for {offender}: {} [{}]",
                content.description(permanent),
                content.confirm_label(permanent),
            );
        }
        GateDecision::AwaitingFirstCheck => println!("-> awaiting first check"),
    }
}

fn report_dialog(grid: &PermissionGrid) {
    match grid.dialog_view() {
        Some(view) => println!(
            "-> dialog [{}] {} ({} / {})",
            view.title, view.description, view.confirm_label, view.cancel_label
        ),
        None => println!("-> no dialog"),
    }
}

fn print_transcript(log: &FlowLog) {
    println!("-- transcript --");
    for event in log.events() {
        println!("{} {}", timestamp_rfc3339(event.timestamp()), describe(event));
    }
}

fn describe(event: &FlowEvent) -> String {
    match event {
        FlowEvent::RequestLaunched { request, permissions, .. } => {
            let names: Vec<&str> = permissions.iter().map(|id| id.name()).collect();
            format!("request {request} launched for [{}]", names.join(", "))
        }
        FlowEvent::ResultDelivered { request, results, .. } => {
            let pairs: Vec<String> = results
                .iter()
                .map(|(id, granted)| format!("{id}={granted}"))
                .collect();
            format!("request {request} delivered [{}]", pairs.join(", "))
        }
        FlowEvent::DialogOpened { target, permanent, .. } => {
            format!("dialog opened for {target} (permanent: {permanent})")
        }
        FlowEvent::DialogDismissed { target, .. } => format!("dialog dismissed for {target}"),
        FlowEvent::SettingsOpened { target, .. } => format!("settings opened for {target}"),
        FlowEvent::FeatureUnlocked { feature, .. } => format!("feature '{feature}' unlocked"),
        FlowEvent::LifecycleChanged { phase, .. } => format!("lifecycle changed to {phase:?}"),
    }
}
