use livetrans_core::{update, AppState, CycleMode, Effect, Msg, TimerKind};
use pretty_assertions::assert_eq;

/// Real-time mode on, a debounce pending and a cycle in flight, nothing left
/// to render.
fn busy_state() -> AppState {
    let (state, _) = update(AppState::new(), Msg::SetEnabled(true));
    let (state, _) = update(state, Msg::TextChanged("Hola".to_string()));
    let (state, _) = update(state, Msg::TimerElapsed { timer_id: 1 });
    let (mut state, _) = update(state, Msg::TextChanged("Hola mundo".to_string()));
    state.consume_dirty();
    state
}

#[test]
fn idle_messages_leave_a_busy_coordinator_alone() {
    for msg in [Msg::Tick, Msg::NoOp] {
        let state = busy_state();
        let (mut next, effects) = update(state.clone(), msg);

        assert_eq!(next, state);
        assert!(effects.is_empty());
        assert!(!next.consume_dirty());
        assert_eq!(next.pending_debounce(), Some(2));
        assert_eq!(next.view().in_flight, Some(CycleMode::Realtime));
    }
}

#[test]
fn idle_messages_do_not_advance_the_timer_ids() {
    let (state, _) = update(busy_state(), Msg::Tick);
    let (_, effects) = update(state, Msg::TextChanged("Hola mundo!".to_string()));

    assert!(matches!(
        effects.as_slice(),
        [
            Effect::CancelTimer { timer_id: 2 },
            Effect::ArmTimer {
                timer_id: 3,
                kind: TimerKind::Debounce,
                ..
            }
        ]
    ));
}
