// Test utility module for entitymap integration tests
#![allow(dead_code)]

use indoc::indoc;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

pub const USER_ENTITY: &str = indoc! {"
    import { Entity, PrimaryGeneratedColumn, Column, OneToMany } from 'typeorm';
    import { Post } from './post.entity';

    @Entity()
    export class User {
      @PrimaryGeneratedColumn()
      id: number;

      @Column()
      email: string;

      @OneToMany(() => Post, (post) => post.author)
      posts: Post[];

      displayName(): string {
        return this.email;
      }
    }
"};

pub const POST_ENTITY: &str = indoc! {"
    import { Entity, PrimaryGeneratedColumn, Column, ManyToOne } from 'typeorm';
    import { User } from './user.entity';

    @Entity()
    export class Post {
      @PrimaryGeneratedColumn()
      id: number;

      @Column({ length: 200 })
      title: string;

      @ManyToOne(() => User, (user) => user.posts)
      author: User;
    }
"};

pub const USERS_CONTROLLER: &str = indoc! {"
    import { Controller, Get, Post } from '@nestjs/common';

    @Controller('users')
    export class UsersController {
      constructor(private readonly users: UsersService) {}

      @Get('/users')
      findAll(): Promise<User[]> {
        return this.users.findAll();
      }

      @Post('/users')
      create(): Promise<User> {
        return this.users.create();
      }
    }
"};

/// Write `content` at `relative` under `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("fixture path has a parent"))
        .expect("Failed to create fixture directory");
    fs::write(path, content).expect("Failed to write fixture file");
}

/// A small TypeORM + NestJS project, plus files the scan must skip.
pub fn typeorm_project() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let root = dir.path();

    write_file(
        root,
        "package.json",
        r#"{"dependencies":{"@nestjs/common":"^10","typeorm":"^0.3"}}"#,
    );
    write_file(root, "src/entities/user.entity.ts", USER_ENTITY);
    write_file(root, "src/entities/post.entity.ts", POST_ENTITY);
    write_file(root, "src/users/users.controller.ts", USERS_CONTROLLER);
    write_file(
        root,
        "src/global.d.ts",
        "@Entity()\nexport class Ghost {\n  id: number;\n}\n",
    );
    write_file(
        root,
        "node_modules/typeorm/index.ts",
        "@Entity()\nexport class Vendored {\n  id: number;\n}\n",
    );

    dir
}

/// Run the built binary with `args`.
pub fn run_entitymap(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_entitymap"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run entitymap binary")
}
