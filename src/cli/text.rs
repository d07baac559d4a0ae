pub const WELCOME: &str = "Welcome to Tower of Hanoi! Type a command or 'h' to read the manual:";

pub const MANUAL: &str = "This is Tower of Hanoi!
Gather every disk on one peg, biggest at the bottom and smallest on top.
A disk may only be put on an empty peg or on a bigger disk.
Commands:
	m X Y	- move the top disk of peg X onto peg Y
	n	- new game
	l	- log in or register another player
	p	- list all players
	s	- suggest the next move
	a	- let the computer finish the game
	j	- print the board as JSON
	h	- print this help message
	q	- quit";

pub const BYE: &str = "Have a nice day and come back later!";

pub const NAME_PROMPT: &str = "Enter your name: ";
