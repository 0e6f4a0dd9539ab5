use forage_core::{AgentId, CellContent, FoodType, GridWorld};

use super::Monster;

/// One character per cell, one line per row.
///
/// Monsters show as the last digit of their roster index, swimming or not,
/// and a grass cell another monster is walking into as `+`. Food is `b`, `a`,
/// `p` or `m`, the ring is `o`, rocks `#`, water `~` and empty grass `.`.
pub fn render_ascii(world: &GridWorld, monsters: &[Monster]) -> String {
    let size = world.size() as usize;
    let mut out = String::with_capacity(size * (size + 1));

    for cell in world.cells() {
        let symbol = match world.agent_at(cell) {
            Some(id) => monster_symbol(monsters, id),
            None => match world.content_at(cell) {
                Some(CellContent::AgentTarget(_)) => '+',
                Some(CellContent::Food(food)) => food_symbol(food),
                Some(CellContent::Item(_)) => 'o',
                Some(CellContent::Obstacle(_)) => '#',
                Some(CellContent::Water) => '~',
                Some(CellContent::AgentOccupied(_) | CellContent::Empty) | None => '.',
            },
        };
        out.push(symbol);
        if cell.x as usize == size - 1 {
            out.push('\n');
        }
    }
    out
}

fn monster_symbol(monsters: &[Monster], id: AgentId) -> char {
    monsters
        .iter()
        .position(|monster| monster.state.id() == id)
        .and_then(|index| char::from_digit((index % 10) as u32, 10))
        .unwrap_or('@')
}

fn food_symbol(food: FoodType) -> char {
    match food {
        FoodType::Berry => 'b',
        FoodType::Apple => 'a',
        FoodType::Pear => 'p',
        FoodType::Melon => 'm',
    }
}
