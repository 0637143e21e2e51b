//! Player Movement State Machine
//!
//! This demo drives the Idle/Walking/Running/Jumping machine through a
//! scripted input sequence, the way a per-frame game loop would.
//!
//! Key concepts:
//! - States own their transition tables, declared at construction
//! - The context is lent read-only into every callback; states request
//!   transitions through a mailbox on the context, and the loop applies
//!   them between ticks
//! - Unsupported events are silently ignored
//!
//! Run with: cargo run --example player_movement

use cogwheel::{id_enum, MachineBuilder, State, TransitionTable};
use std::cell::Cell;

id_enum! {
    enum PlayerState {
        Idle,
        Walking,
        Running,
        Jumping,
    }
}

id_enum! {
    enum PlayerEvent {
        StartWalk,
        StartRun,
        Jump,
        Land,
        Stop,
    }
}

/// The owner the machine acts on behalf of. Interior mutability lets
/// states update it through the shared reference.
#[derive(Default)]
struct Player {
    stamina: Cell<f32>,
    airborne_for: Cell<f32>,
    /// Transition wish recorded during a tick, applied by the loop.
    pending: Cell<Option<PlayerEvent>>,
}

struct Movement {
    id: PlayerState,
    table: TransitionTable<PlayerEvent, PlayerState>,
    stamina_per_second: f32,
}

impl Movement {
    fn new(
        id: PlayerState,
        stamina_per_second: f32,
        edges: &[(PlayerEvent, PlayerState)],
    ) -> Self {
        let mut table = TransitionTable::new();
        for &(event, target) in edges {
            table.declare(event, target).unwrap();
        }
        Movement {
            id,
            table,
            stamina_per_second,
        }
    }
}

impl State<Player, PlayerState, PlayerEvent> for Movement {
    fn id(&self) -> PlayerState {
        self.id
    }

    fn transitions(&self) -> &TransitionTable<PlayerEvent, PlayerState> {
        &self.table
    }

    fn transitions_mut(&mut self) -> &mut TransitionTable<PlayerEvent, PlayerState> {
        &mut self.table
    }

    fn on_enter(&mut self, ctx: &Player) {
        if self.id == PlayerState::Jumping {
            ctx.airborne_for.set(0.0);
        }
        println!("  -> entered {}", self.id);
    }

    fn on_exit(&mut self, _ctx: &Player) {
        println!("  <- left {}", self.id);
    }

    fn on_reason(&mut self, ctx: &Player, dt: f32) {
        match self.id {
            // Running drains stamina; ask to slow down when spent.
            PlayerState::Running if ctx.stamina.get() <= 0.0 => {
                ctx.pending.set(Some(PlayerEvent::Stop));
            }
            // A short hop: land after half a second in the air.
            PlayerState::Jumping => {
                ctx.airborne_for.set(ctx.airborne_for.get() + dt);
                if ctx.airborne_for.get() >= 0.5 {
                    ctx.pending.set(Some(PlayerEvent::Land));
                }
            }
            _ => {}
        }
    }

    fn on_act(&mut self, ctx: &Player, dt: f32) {
        ctx.stamina
            .set((ctx.stamina.get() + self.stamina_per_second * dt).clamp(0.0, 10.0));
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let player = Player::default();
    player.stamina.set(2.0);

    let mut machine = MachineBuilder::new(player)
        .state(Movement::new(
            PlayerState::Idle,
            2.0,
            &[
                (PlayerEvent::StartWalk, PlayerState::Walking),
                (PlayerEvent::Jump, PlayerState::Jumping),
            ],
        ))
        .state(Movement::new(
            PlayerState::Walking,
            0.5,
            &[
                (PlayerEvent::StartRun, PlayerState::Running),
                (PlayerEvent::Stop, PlayerState::Idle),
                (PlayerEvent::Jump, PlayerState::Jumping),
            ],
        ))
        .state(Movement::new(
            PlayerState::Running,
            -2.0,
            &[(PlayerEvent::Stop, PlayerState::Walking)],
        ))
        .state(Movement::new(
            PlayerState::Jumping,
            0.0,
            &[(PlayerEvent::Land, PlayerState::Idle)],
        ))
        .initial(PlayerState::Idle)
        .build()
        .expect("player machine configuration is static and valid");

    // Scripted input: frame number -> event, standing in for a real
    // input system.
    let inputs = [
        (2, PlayerEvent::StartWalk),
        (5, PlayerEvent::StartRun),
        (8, PlayerEvent::StartWalk), // unsupported from Running, ignored
        (30, PlayerEvent::Jump),
    ];

    let dt = 0.1;
    for frame in 0..60u32 {
        if let Some(&(_, event)) = inputs.iter().find(|&&(at, _)| at == frame) {
            println!("frame {frame}: input {event}");
            machine.perform_transition(event).unwrap();
        }

        machine.tick(dt);

        // Apply at most one transition wish per frame, outside the tick.
        if let Some(event) = machine.context().pending.take() {
            println!("frame {frame}: state requested {event}");
            machine.perform_transition(event).unwrap();
        }
    }

    println!(
        "final state: {}, stamina {:.1}",
        machine.current_state_id().expect("machine was initialized"),
        machine.context().stamina.get()
    );
}
