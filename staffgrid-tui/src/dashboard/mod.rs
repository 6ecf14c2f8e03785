//! Employee dashboard: two grids and department capacity gauges.

mod input;
mod render;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use staffgrid::grid::{Alignment, Column, DataSource, GridEvent, GridFactory, ScrollTarget};
use staffgrid::model::{Department, Employee};
use staffgrid::progress::ProgressIndicator;
use staffgrid::service::{DepartmentService, EmployeeService, progress_color};
use staffgrid::DataGrid;

use crate::error::AppError;
use crate::settings::Settings;
use crate::terminal::{Line, Span, SpanStyle, Terminal};
use crate::wakeup::{WakeupReceiver, WakeupSender};

pub use input::{Action, GridAction, action_for, apply};

const TITLE: &str = "Employee Hub Management";
const HELP: &str =
    "Tab focus · ←/→ page · 1-9 sort · +/- page size · 0 all rows · j/k scroll · q quit";

/// The scrollable sections of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Employees,
    Departments,
}

impl Section {
    fn next(self) -> Self {
        match self {
            Section::Employees => Section::Departments,
            Section::Departments => Section::Employees,
        }
    }
}

/// Pending scroll-into-view request, shared with the grids' scroll targets.
struct ScrollRequests {
    pending: Mutex<Option<Section>>,
    wakeup: WakeupSender,
}

impl ScrollRequests {
    fn take(&self) -> Option<Section> {
        self.pending.lock().ok().and_then(|mut guard| guard.take())
    }
}

/// Scroll target for one dashboard section.
struct SectionAnchor {
    section: Section,
    requests: Arc<ScrollRequests>,
}

impl ScrollTarget for SectionAnchor {
    fn scroll_into_view(&self) {
        if let Ok(mut guard) = self.requests.pending.lock() {
            *guard = Some(self.section);
            self.requests.wakeup.send();
        }
    }
}

/// One laid-out frame.
pub struct Screen {
    pub lines: Vec<Line>,
    anchors: HashMap<Section, usize>,
}

impl Screen {
    /// First line of a section.
    pub fn anchor(&self, section: Section) -> Option<usize> {
        self.anchors.get(&section).copied()
    }
}

/// The dashboard view.
pub struct Dashboard {
    employees: DataGrid<Employee>,
    departments: DataGrid<Department>,
    gauges: Vec<(String, ProgressIndicator)>,
    focus: Section,
    offset: usize,
    settings: Settings,
    requests: Arc<ScrollRequests>,
    // The grids only hold weak references to their scroll targets.
    _anchors: Vec<Arc<dyn ScrollTarget>>,
    redraw: bool,
    quit: bool,
}

impl Dashboard {
    pub fn new(
        factory: &mut GridFactory,
        settings: Settings,
        employee_service: &EmployeeService,
        department_service: &DepartmentService,
        wakeup: WakeupSender,
    ) -> Self {
        let requests = Arc::new(ScrollRequests {
            pending: Mutex::new(None),
            wakeup,
        });
        let employee_anchor: Arc<dyn ScrollTarget> = Arc::new(SectionAnchor {
            section: Section::Employees,
            requests: Arc::clone(&requests),
        });
        let department_anchor: Arc<dyn ScrollTarget> = Arc::new(SectionAnchor {
            section: Section::Departments,
            requests: Arc::clone(&requests),
        });

        let mut employees: DataGrid<Employee> = factory.create().with_columns(employee_columns());
        employees.set_scroll_target(&employee_anchor);
        employees.configure(
            DataSource::Stream(employee_service.employees()),
            settings.employee_page_size,
            true,
        );

        let mut departments: DataGrid<Department> =
            factory.create().with_columns(department_columns());
        departments.set_scroll_target(&department_anchor);
        departments.configure(
            DataSource::Stream(department_service.departments()),
            settings.department_page_size,
            true,
        );

        log::info!(
            "Dashboard ready: {} employees, {} departments",
            employees.row_count(),
            departments.row_count()
        );

        let mut dashboard = Self {
            employees,
            departments,
            gauges: Vec::new(),
            focus: Section::Employees,
            offset: 0,
            settings,
            requests,
            _anchors: vec![employee_anchor, department_anchor],
            redraw: true,
            quit: false,
        };
        dashboard.sync_gauges();
        dashboard
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Runs until the user quits or input ends.
    pub async fn run(
        mut self,
        terminal: &mut Terminal,
        mut wakeup: WakeupReceiver,
    ) -> Result<(), AppError> {
        let mut input = EventStream::new();

        while !self.should_quit() {
            if self.needs_render() {
                self.render(terminal)?;
            }

            tokio::select! {
                event = input.next() => match event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                changed = self.employees.next_emission() => {
                    if changed {
                        log::debug!("Employees updated: {} rows", self.employees.row_count());
                    }
                }
                changed = self.departments.next_emission() => {
                    if changed {
                        self.sync_gauges();
                    }
                }
                Some(()) = wakeup.recv() => {
                    wakeup.drain();
                    self.redraw = true;
                }
            }

            self.process_events();
        }

        self.teardown();
        Ok(())
    }

    /// Handles one terminal event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                if let Some(action) = action_for(key) {
                    self.perform(action);
                }
            }
            Event::Resize(_, _) => self.redraw = true,
            _ => {}
        }
    }

    /// Performs a user action.
    pub fn perform(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit = true,
            Action::FocusNext => {
                self.focus = self.focus.next();
                self.redraw = true;
            }
            Action::Grid(grid_action) => {
                let accepted = match self.focus {
                    Section::Employees => apply(&mut self.employees, grid_action),
                    Section::Departments => apply(&mut self.departments, grid_action),
                };
                if !accepted {
                    log::debug!("{:?} ignored by {:?} grid", grid_action, self.focus);
                }
            }
            Action::Scroll(delta) => {
                self.offset = self.offset.saturating_add_signed(delta);
                self.redraw = true;
            }
            Action::ScrollTop => {
                self.offset = 0;
                self.redraw = true;
            }
        }
    }

    /// Logs grid events and persists page-size changes.
    pub fn process_events(&mut self) {
        for event in self.employees.drain_events() {
            match &event {
                GridEvent::Sort(change) => log::info!("Employee sort changed: {:?}", change),
                GridEvent::Pagination(change) => {
                    log::info!("Employee pagination changed: {:?}", change);
                    if change.page_size != self.settings.employee_page_size {
                        self.settings.employee_page_size = change.page_size;
                        self.persist_settings();
                    }
                }
            }
        }
        for event in self.departments.drain_events() {
            match &event {
                GridEvent::Sort(change) => log::info!("Department sort changed: {:?}", change),
                GridEvent::Pagination(change) => {
                    log::info!("Department pagination changed: {:?}", change);
                    if change.page_size != self.settings.department_page_size {
                        self.settings.department_page_size = change.page_size;
                        self.persist_settings();
                    }
                }
            }
        }
    }

    fn persist_settings(&self) {
        if let Err(e) = self.settings.save() {
            log::warn!("Could not save settings: {}", e);
        }
    }

    /// Rebuilds the capacity gauges from the department collection.
    fn sync_gauges(&mut self) {
        let departments = self.departments.current_rows();
        self.gauges.retain(|(name, _)| departments.iter().any(|d| &d.name == name));

        for department in departments {
            let occupancy = department.occupancy_percentage() as f64;
            let index = match self.gauges.iter().position(|(name, _)| name == &department.name) {
                Some(index) => index,
                None => {
                    let name = department.name.clone();
                    let gauge = ProgressIndicator::new().on_complete(move || {
                        log::info!("Department {} reached full capacity", name);
                    });
                    self.gauges.push((department.name.clone(), gauge));
                    self.gauges.len() - 1
                }
            };
            let gauge = &mut self.gauges[index].1;
            gauge.set_color(progress_color(occupancy));
            gauge.set_progress(occupancy);
        }
        self.redraw = true;
    }

    /// Lays out the whole dashboard.
    pub fn screen(&self) -> Screen {
        let mut lines: Vec<Line> = vec![
            vec![Span::styled(TITLE, SpanStyle::default().bold())],
            vec![Span::styled(HELP, SpanStyle::default().dim())],
            Vec::new(),
            vec![Span::styled(
                "Department capacity",
                SpanStyle::default().bold(),
            )],
        ];
        for (name, gauge) in &self.gauges {
            lines.push(render::gauge_line(name, gauge));
        }
        lines.push(Vec::new());

        let mut anchors = HashMap::new();
        anchors.insert(Section::Employees, lines.len());
        lines.extend(render::grid_lines(
            &self.employees,
            "Employees",
            self.focus == Section::Employees,
        ));
        lines.push(Vec::new());

        anchors.insert(Section::Departments, lines.len());
        lines.extend(render::grid_lines(
            &self.departments,
            "Departments",
            self.focus == Section::Departments,
        ));

        Screen { lines, anchors }
    }

    fn needs_render(&self) -> bool {
        self.redraw || self.employees.is_dirty() || self.departments.is_dirty()
    }

    fn render(&mut self, terminal: &mut Terminal) -> Result<(), AppError> {
        let screen = self.screen();
        let (_, height) = terminal.size()?;

        if let Some(section) = self.requests.take()
            && let Some(anchor) = screen.anchor(section)
        {
            self.offset = anchor;
        }
        let max_offset = screen.lines.len().saturating_sub(height as usize);
        self.offset = self.offset.min(max_offset);

        terminal.draw(&screen.lines, self.offset)?;

        self.employees.clear_dirty();
        self.departments.clear_dirty();
        self.redraw = false;
        Ok(())
    }

    fn teardown(&mut self) {
        self.employees.teardown();
        self.departments.teardown();
        for (_, gauge) in &mut self.gauges {
            gauge.teardown();
        }
    }
}

fn employee_columns() -> Vec<Column> {
    vec![
        Column::new("id", "ID").width(6).align(Alignment::Right),
        Column::new("firstName", "First name").width(12),
        Column::new("lastName", "Last name").width(12),
        Column::new("email", "Email").width(24).unsortable(),
        Column::new("department", "Department").width(14),
    ]
}

fn department_columns() -> Vec<Column> {
    vec![
        Column::new("name", "Department").width(14),
        Column::new("currentEmployees", "Staff").width(9).align(Alignment::Right),
        Column::new("maxCapacity", "Capacity").width(12).align(Alignment::Right),
        Column::new("vacancyPercentage", "Vacancy %").width(13).align(Alignment::Right),
    ]
}

#[cfg(test)]
mod tests {
    use staffgrid::grid::Direction;
    use staffgrid::service::seed_employees;

    use super::*;
    use crate::terminal::line_text;
    use crate::wakeup;

    fn dashboard() -> (Dashboard, EmployeeService, WakeupReceiver) {
        let employees = EmployeeService::new();
        let departments = DepartmentService::new(employees.clone());
        let (tx, rx) = wakeup::channel();
        let settings = Settings::default();
        let dashboard = Dashboard::new(
            &mut GridFactory::new(),
            settings,
            &employees,
            &departments,
            tx,
        );
        (dashboard, employees, rx)
    }

    #[test]
    fn test_initial_state() {
        let (dashboard, _service, _rx) = dashboard();
        assert_eq!(dashboard.employees.row_count(), 29);
        assert_eq!(dashboard.employees.total_pages(), 3);
        assert_eq!(dashboard.employees.paged_rows().len(), 10);
        assert_eq!(dashboard.departments.row_count(), 7);
        assert_eq!(dashboard.departments.total_pages(), 1);
        assert_eq!(dashboard.gauges.len(), 7);
        assert_eq!(dashboard.gauges[0].1.progress(), 80.0);
    }

    #[test]
    fn test_actions_go_to_focused_grid() {
        let (mut dashboard, _service, _rx) = dashboard();
        dashboard.perform(Action::Grid(GridAction::SortColumn(2)));
        assert_eq!(dashboard.employees.sort_column(), Some("lastName"));
        assert_eq!(
            dashboard.employees.paged_rows()[0].last_name,
            "Anderson"
        );

        dashboard.perform(Action::FocusNext);
        assert_eq!(dashboard.focus, Section::Departments);
        dashboard.perform(Action::Grid(GridAction::SortColumn(3)));
        dashboard.perform(Action::Grid(GridAction::SortColumn(3)));
        assert_eq!(dashboard.departments.sort_direction(), Direction::Desc);
        assert_eq!(dashboard.departments.paged_rows()[0].name, "Services");
        assert_eq!(dashboard.employees.sort_column(), Some("lastName"));
    }

    #[test]
    fn test_employee_updates_flow_into_both_grids() {
        let (mut dashboard, service, _rx) = dashboard();
        let mut roster = seed_employees();
        roster.truncate(2);
        service.replace(roster);

        assert!(dashboard.employees.poll_source());
        assert!(dashboard.departments.poll_source());
        dashboard.sync_gauges();
        assert_eq!(dashboard.employees.row_count(), 2);
        assert_eq!(dashboard.employees.total_pages(), 1);
        assert_eq!(dashboard.departments.paged_rows()[1].current_employees, 1);
        assert_eq!(dashboard.gauges[1].1.progress(), 20.0);
    }

    #[test]
    fn test_screen_anchors_sections() {
        let (dashboard, _service, _rx) = dashboard();
        let screen = dashboard.screen();
        let employees_at = screen.anchor(Section::Employees).unwrap();
        let departments_at = screen.anchor(Section::Departments).unwrap();
        assert!(line_text(&screen.lines[employees_at]).contains("Employees"));
        assert!(line_text(&screen.lines[departments_at]).contains("Departments"));
        assert!(departments_at > employees_at);
    }

    #[test]
    fn test_quit_action() {
        let (mut dashboard, _service, _rx) = dashboard();
        assert!(!dashboard.should_quit());
        dashboard.perform(Action::Quit);
        assert!(dashboard.should_quit());
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_change_requests_scroll() {
        let (mut dashboard, _service, mut rx) = dashboard();
        dashboard.perform(Action::Grid(GridAction::NextPage));
        assert_eq!(dashboard.employees.current_page(), 2);

        rx.recv().await.unwrap();
        assert_eq!(dashboard.requests.take(), Some(Section::Employees));
    }
}
