// src/surface/headless.rs

//! Recording surface implementation with no real backing store.
//!
//! Executes nothing; it remembers everything. Tests drive the layer against
//! a [`HeadlessSurface`] and assert on the recorded geometry, command
//! batches, presented frame count and cursor style.

use super::{CursorStyle, RenderCommand, Surface};
use crate::viewport::ScreenPoint;
use anyhow::Result;
use log::trace;

#[derive(Debug, Default)]
pub struct HeadlessSurface {
    origin: Option<ScreenPoint>,
    size: Option<(u32, u32)>,
    commands: Vec<RenderCommand>,
    frames_presented: usize,
    cursor: CursorStyle,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands executed since the last [`HeadlessSurface::take_commands`].
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Drains the recorded commands, leaving the surface ready for the
    /// next frame's assertions.
    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn frames_presented(&self) -> usize {
        self.frames_presented
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    pub fn origin(&self) -> Option<ScreenPoint> {
        self.origin
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }
}

impl Surface for HeadlessSurface {
    fn reset_geometry(&mut self, origin: ScreenPoint, width: u32, height: u32) -> Result<()> {
        trace!("HeadlessSurface: reset to ({}, {}) {width}x{height}", origin.x, origin.y);
        self.origin = Some(origin);
        self.size = Some((width, height));
        Ok(())
    }

    fn execute(&mut self, commands: &[RenderCommand]) -> Result<()> {
        trace!("HeadlessSurface: executing {} commands", commands.len());
        self.commands.extend_from_slice(commands);
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.frames_presented += 1;
        Ok(())
    }

    fn set_cursor(&mut self, cursor: CursorStyle) -> Result<()> {
        self.cursor = cursor;
        Ok(())
    }
}
