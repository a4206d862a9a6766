//! Weapon discharge.

use broadside_ai::gunnery;
use broadside_core::enums::WeaponKind;
use broadside_core::state::{EntityId, Projectile, Ship};

/// Fire weapon `index` of `ship` at clock time `now`, spawning projectile `id`.
///
/// The caller has already cleared the shot with [`gunnery::check`].
/// Returns `None` if the index does not name a weapon.
pub fn discharge(ship: &mut Ship, index: usize, now: f64, id: EntityId) -> Option<Projectile> {
    let velocity = gunnery::muzzle_velocity(ship.rotation.yaw);
    let weapon = ship.weapons.get_mut(index)?;

    weapon.last_fired = Some(now);
    if weapon.kind == WeaponKind::Energy {
        weapon.current_charge = 0.0;
    }

    Some(Projectile {
        id,
        position: ship.position,
        velocity,
        damage: weapon.damage,
        range: weapon.range,
        traveled: 0.0,
        owner_id: ship.id,
    })
}
