//! Client connection handling: relays parsed commands to the server and
//! applies every broadcast packet to the view.

use crate::game::GameView;
use crate::input::{self, Command};
use log::warn;
use shared::Packet;
use std::io;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

pub struct Client {
    reader: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
    view: GameView,
}

impl Client {
    /// Connects and immediately sends the join intent. `room` of `None`
    /// asks the server to create a fresh room.
    pub async fn new(addr: &str, room: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let stream = TcpStream::connect(addr).await?;
        let (read_half, write_half) = stream.into_split();

        let mut client = Client {
            reader: BufReader::new(read_half).lines(),
            writer: write_half,
            view: GameView::new(),
        };
        client.send(Packet::Join { room_id: room }).await?;
        Ok(client)
    }

    async fn send(&mut self, packet: Packet) -> io::Result<()> {
        let mut line = serde_json::to_string(&packet)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        line.push('\n');
        self.writer.write_all(line.as_bytes()).await
    }

    /// Relays stdin commands and renders server packets until the player
    /// quits or the server hangs up.
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdin = BufReader::new(tokio::io::stdin()).lines();
        println!("Commands: move <0-8> (or just the number), chat <text>, restart, quit");

        loop {
            tokio::select! {
                line = self.reader.next_line() => {
                    match line? {
                        Some(line) => self.handle_server_line(&line),
                        None => {
                            println!("Server closed the connection.");
                            break;
                        }
                    }
                },

                line = stdin.next_line() => {
                    let Some(line) = line? else { break };
                    match input::parse(&line) {
                        Some(Command::Quit) => {
                            self.send(Packet::Leave).await?;
                            break;
                        }
                        Some(Command::Move(cell)) => self.send(Packet::Move { cell }).await?,
                        Some(Command::Chat(text)) => self.send(Packet::Chat { text }).await?,
                        Some(Command::Restart) => self.send(Packet::Restart).await?,
                        None => println!("Unrecognized command."),
                    }
                },
            }
        }

        Ok(())
    }

    fn handle_server_line(&mut self, line: &str) {
        match serde_json::from_str::<Packet>(line) {
            Ok(packet) => {
                for output in self.view.apply(packet) {
                    println!("{}", output);
                }
            }
            Err(e) => warn!("Undecodable frame from server: {}", e),
        }
    }
}
