use snake_term::canvas::{AsciiPainter, Canvas};
use snake_term::config::GridSize;
use snake_term::game::{GameState, Outcome};
use snake_term::input::Direction;
use snake_term::snake::Position;
use snake_term::surface::Surface;

fn symbol(canvas: &Canvas, position: Position) -> String {
    let x = u16::try_from(position.x).expect("test positions are non-negative");
    let y = u16::try_from(position.y).expect("test positions are non-negative");
    canvas
        .buffer()
        .cell((x, y))
        .map(|cell| cell.symbol().to_owned())
        .unwrap_or_default()
}

#[test]
fn stepwise_fruit_collection_and_wall_collision() {
    let bounds = GridSize {
        width: 20,
        height: 8,
    };
    let mut canvas = Canvas::new(bounds, Box::new(AsciiPainter));
    let mut state = GameState::new_with_seed(bounds, 3, 42);
    assert_eq!(state.snake.head(), Position::new(10, 4));

    state.fruit = Position::new(11, 4);
    state.paint(&mut canvas);

    assert_eq!(state.tick(None, &mut canvas), Outcome::Eaten);
    assert_eq!(state.score, 1);
    assert_eq!(state.snake.len(), 4);
    assert_eq!(symbol(&canvas, Position::new(11, 4)), "@");
    assert_eq!(symbol(&canvas, Position::new(8, 4)), "#");
    assert_eq!(symbol(&canvas, state.fruit), "*");
    assert_eq!(symbol(&canvas, Position::new(15, 0)), "1");

    // Reversing is ignored; the snake keeps heading right.
    state.fruit = Position::new(1, 1);
    assert_eq!(state.tick(Some(Direction::Left), &mut canvas), Outcome::Fine);
    assert_eq!(state.snake.head(), Position::new(12, 4));
    assert_eq!(symbol(&canvas, Position::new(8, 4)), " ");

    assert_eq!(state.tick(Some(Direction::Up), &mut canvas), Outcome::Fine);
    assert_eq!(state.tick(None, &mut canvas), Outcome::Fine);
    assert_eq!(state.tick(None, &mut canvas), Outcome::Fine);
    assert_eq!(state.snake.head(), Position::new(12, 1));

    assert_eq!(state.tick(None, &mut canvas), Outcome::Died);
}

#[test]
fn growth_and_containment_hold_over_a_long_session() {
    let bounds = GridSize {
        width: 24,
        height: 16,
    };
    let mut canvas = Canvas::new(bounds, Box::new(AsciiPainter));
    let mut state = GameState::new_with_seed(bounds, 3, 9);
    let initial_length = state.snake.len();

    // Walk a clockwise rectangle well inside the border.
    let route = [
        (Direction::Right, 5),
        (Direction::Down, 4),
        (Direction::Left, 8),
        (Direction::Up, 6),
        (Direction::Right, 3),
    ];

    let mut eaten = 0;
    for (direction, steps) in route {
        for step in 0..steps {
            let turn = (step == 0).then_some(direction);
            // Feed the snake on its first four steps, then park the fruit
            // in a corner the route never visits.
            state.fruit = if eaten < 4 {
                state.snake.head().offset(direction.delta())
            } else {
                Position::new(22, 14)
            };

            match state.tick(turn, &mut canvas) {
                Outcome::Eaten => eaten += 1,
                Outcome::Fine => {}
                Outcome::Died => panic!("snake died at {:?}", state.snake.head()),
            }

            let segments: Vec<Position> = state.snake.segments().copied().collect();
            assert_eq!(state.snake.len(), initial_length + eaten);
            assert!(
                segments
                    .iter()
                    .all(|segment| segment.is_within_interior(canvas.bounds()))
            );
            for (index, segment) in segments.iter().enumerate() {
                assert!(!segments[index + 1..].contains(segment));
            }
            assert!(!state.snake.occupies(state.fruit));
        }
    }

    assert_eq!(eaten, 4);
    assert_eq!(state.score, 4);
}
