#[cfg(test)]
mod input_system_tests {
    use crate::DimmerPlugin;
    use crate::components::dimmer::LightDimmer;
    use crate::input::DimAction;
    use bevy::prelude::*;
    use leafwing_input_manager::prelude::ActionState;

    #[test]
    fn test_toggle_action_exists() {
        let action = DimAction::ToggleLights;
        assert_eq!(format!("{:?}", action), "ToggleLights");
        assert_eq!(DimAction::default(), DimAction::ToggleLights);
    }

    #[test]
    fn test_key_press_toggles_dimmer() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(DimmerPlugin);

        app.world_mut().spawn(PointLight {
            intensity: 1.0,
            ..default()
        });
        let dimmer = app
            .world_mut()
            .spawn((LightDimmer::default(), ActionState::<DimAction>::default()))
            .id();
        app.update();
        assert!(!app.world().get::<LightDimmer>(dimmer).unwrap().is_dimmed());

        app.world_mut()
            .get_mut::<ActionState<DimAction>>(dimmer)
            .unwrap()
            .press(&DimAction::ToggleLights);
        app.update();

        let dimmer = app.world().get::<LightDimmer>(dimmer).unwrap();
        assert!(dimmer.is_dimmed(), "pressing the key should dim the lights");
        assert_eq!(dimmer.controller().active_fades(), 1);
    }

    #[test]
    fn test_idle_action_state_does_nothing() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(DimmerPlugin);

        let dimmer = app
            .world_mut()
            .spawn((LightDimmer::default(), ActionState::<DimAction>::default()))
            .id();
        for _ in 0..5 {
            app.update();
        }

        assert!(!app.world().get::<LightDimmer>(dimmer).unwrap().is_dimmed());
    }
}
