use liminal_kernel::HudSnapshot;

/// Presentation collaborator: turns a per-tick snapshot into something a
/// player can read. Never mutates the world.
pub trait Presenter {
    type Output;

    fn present(&self, snapshot: &HudSnapshot) -> Self::Output;
}

/// Plain-text HUD for terminals and logs.
#[derive(Debug, Default)]
pub struct TextHud {
    /// Include live notifications below the stats block.
    pub show_notifications: bool,
}

impl TextHud {
    pub fn new() -> Self {
        Self {
            show_notifications: true,
        }
    }

    /// One-line form for per-tick logging.
    pub fn status_line(snapshot: &HudSnapshot) -> String {
        format!(
            "[{}] {} hp={:.0} en={:.0} walk={:.1}s items={}/{} pos=({:.1}, {:.1}, {:.1})",
            snapshot.tick,
            snapshot.theme,
            snapshot.health,
            snapshot.energy,
            snapshot.walk_time,
            snapshot.inventory.len(),
            snapshot.inventory_capacity,
            snapshot.position.x,
            snapshot.position.y,
            snapshot.position.z,
        )
    }
}

impl Presenter for TextHud {
    type Output = String;

    fn present(&self, snapshot: &HudSnapshot) -> String {
        let mut out = String::new();
        let walked = snapshot.walk_time.min(snapshot.exploration_threshold);
        let doors = if snapshot.exploration_unlocked {
            "Available".to_string()
        } else {
            format!("Walk {:.0}s more", snapshot.walk_remaining().ceil())
        };

        out.push_str(&format!("Level: {}\n", snapshot.theme));
        out.push_str(&format!("Health: {:.0}/100\n", snapshot.health));
        out.push_str(&format!("Energy: {:.0}/100\n", snapshot.energy));
        out.push_str(&format!(
            "Walk Time: {:.0}/{:.0}s\n",
            walked, snapshot.exploration_threshold
        ));
        out.push_str(&format!("Doors: {doors}\n"));
        out.push_str(&format!(
            "Items: {}/{}\n",
            snapshot.inventory.len(),
            snapshot.inventory_capacity
        ));
        for (name, count) in snapshot.inventory_counts() {
            out.push_str(&format!("  {name}: {count}\n"));
        }
        if snapshot.lighting_boosted {
            out.push_str("Lighting: boosted\n");
        }
        if let Some(kind) = snapshot.nearby_portal {
            out.push_str(&format!("Nearby: {}\n", kind.label()));
        }
        if self.show_notifications {
            for note in &snapshot.notifications {
                out.push_str(&format!("> {note}\n"));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liminal_kernel::World;

    #[test]
    fn fresh_session_hud() {
        let world = World::with_seed(1);
        let text = TextHud::new().present(&world.snapshot());
        assert!(text.contains("Level: Backrooms Level 0"));
        assert!(text.contains("Health: 100/100"));
        assert!(text.contains("Doors: Walk 30s more"));
        assert!(text.contains("Items: 0/5"));
        assert!(!text.contains("Nearby"));
    }

    #[test]
    fn notifications_can_be_suppressed() {
        let mut world = World::with_seed(2);
        world.drop_oldest().unwrap_err();
        let snapshot = world.snapshot();
        assert!(TextHud::new().present(&snapshot).contains("> No items to drop!"));
        let quiet = TextHud {
            show_notifications: false,
        };
        assert!(!quiet.present(&snapshot).contains("No items"));
    }

    #[test]
    fn status_line_is_compact() {
        let world = World::with_seed(3);
        let line = TextHud::status_line(&world.snapshot());
        assert!(line.starts_with("[0] Backrooms Level 0"));
        assert!(!line.contains('\n'));
    }
}
