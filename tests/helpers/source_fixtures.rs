//! Common source code fixtures for tests.

pub const REPO: &str = "defmodule MyApp.Repo do\nend\n";

pub const ACCOUNTS: &str = r#"
defmodule MyApp.Accounts.User do
  defmodule Profile do
  end
end
"#;

pub const SERVER: &str = r#"
defmodule MyApp.Server do
  defmodule Worker do
  end

  MyApp.Repo
  __MODULE__.Worker
  Worker
end
"#;

pub const WEB: &str = r#"
defmodule MyApp.Web do
  alias MyApp.Accounts.User
  alias MyApp.Accounts.User, as: Account

  User
  Account.Profile
  Account.Missing
end
"#;

pub const PROTOCOL: &str = r#"
defprotocol Size do
end

defimpl Size, for: Map do
end

Size.Map
"#;
