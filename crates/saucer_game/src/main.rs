fn main() {
    saucer_game::run();
}
